pub mod dom;
pub mod nav;
pub mod net;
