//! Interactive shell playing the browser's role around the navigator.
//!
//! Loads a start page, installs the enhancement once, then routes typed
//! events (hover/click/back/forward) into it and acts on the outcomes:
//! a `FullLoad` becomes a real fetch-and-replace, a `Swapped` prints the
//! new title and runs the scroll-reset/script steps a browser would.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use swapdash::dom::parser::parse_html;
use swapdash::dom::Document;
use swapdash::nav::{NavConfig, NavOutcome, Navigator};
use swapdash::net::fetch::{Fetch, FetchError, HttpFetcher};

fn main() -> ExitCode {
    env_logger::init();

    let start_url = match std::env::args().nth(1) {
        Some(url) => url,
        None => {
            eprintln!("usage: swapdash <start-url>");
            return ExitCode::FAILURE;
        }
    };

    let config = NavConfig::default();
    let loader = HttpFetcher::new(config.user_agent.clone());

    let doc = match full_load(&loader, &start_url) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("failed to load {}: {}", start_url, e);
            return ExitCode::FAILURE;
        }
    };
    println!("loaded \"{}\" ({})", doc.title, doc.url);

    // One navigator per page session; the shell is the install guard.
    let Some(mut nav) = Navigator::install(doc, HttpFetcher::new(config.user_agent.clone()), config)
    else {
        println!("instant navigation inactive, links stay native");
        return ExitCode::SUCCESS;
    };

    print_links(&nav);
    println!("commands: links | hover <n|url> | click <n|url> | back | forward | stats | quit");

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let mut parts = line.split_whitespace();
        let cmd = parts.next().unwrap_or("");
        let arg = parts.next();

        match cmd {
            "links" => print_links(&nav),
            "hover" => {
                if let Some(url) = pick(&nav, arg) {
                    nav.hover(&url);
                    println!("preloading {}", url);
                }
            }
            "click" => {
                if let Some(url) = pick(&nav, arg) {
                    match nav.click(&url) {
                        NavOutcome::Swapped(swap) => {
                            // Browser equivalents: scroll to top, run scripts
                            println!("swapped to \"{}\" ({})", swap.title, swap.url);
                            for script in &swap.scripts {
                                match &script.src {
                                    Some(src) => println!("  script: {}", src),
                                    None => println!("  inline script ({} bytes)", script.code.len()),
                                }
                            }
                            print_links(&nav);
                        }
                        NavOutcome::FullLoad(url) => native_load(&mut nav, &loader, &url),
                    }
                }
            }
            "back" => match nav.back() {
                Some(NavOutcome::FullLoad(url)) => native_load(&mut nav, &loader, &url),
                Some(NavOutcome::Swapped(_)) => {}
                None => println!("history is at the oldest entry"),
            },
            "forward" => match nav.forward() {
                Some(NavOutcome::FullLoad(url)) => native_load(&mut nav, &loader, &url),
                Some(NavOutcome::Swapped(_)) => {}
                None => println!("history is at the newest entry"),
            },
            "stats" => {
                println!(
                    "cache: {} pages, hit rate {:.0}%; history: {} entries",
                    nav.cache().len(),
                    nav.cache().hit_rate() * 100.0,
                    nav.history().len()
                );
            }
            "quit" | "exit" => break,
            "" => {}
            other => println!("unknown command: {}", other),
        }
    }

    ExitCode::SUCCESS
}

/// Native navigation: fetch, parse, hand the document to the navigator.
fn native_load<F: Fetch + 'static>(nav: &mut Navigator<F>, loader: &HttpFetcher, url: &str) {
    match full_load(loader, url) {
        Ok(doc) => {
            println!("full load of \"{}\" ({})", doc.title, doc.url);
            nav.replace_document(doc);
            print_links(nav);
        }
        Err(e) => println!("full load of {} failed: {}", url, e),
    }
}

fn full_load(loader: &HttpFetcher, url: &str) -> Result<Document, FetchError> {
    let result = loader.fetch(url)?;
    Ok(parse_html(&result.html, &result.url))
}

fn print_links<F: Fetch + 'static>(nav: &Navigator<F>) {
    let links = nav.bound_links();
    if links.is_empty() {
        println!("no instant-navigation links on this page");
        return;
    }
    for (i, url) in links.iter().enumerate() {
        println!("  [{}] {}", i, url);
    }
}

/// Resolve a `hover`/`click` argument: an index into the bound list or a
/// raw URL.
fn pick<F: Fetch + 'static>(nav: &Navigator<F>, arg: Option<&str>) -> Option<String> {
    let arg = match arg {
        Some(a) => a,
        None => {
            println!("expected a link index or URL");
            return None;
        }
    };
    if let Ok(idx) = arg.parse::<usize>() {
        let links = nav.bound_links();
        match links.get(idx) {
            Some(url) => return Some(url.clone()),
            None => {
                println!("no link [{}]", idx);
                return None;
            }
        }
    }
    Some(arg.to_string())
}
