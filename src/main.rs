use std::env;
use std::io::{self, Read, Write};
use std::process;

use anyhow::Context;
use browserid::config::Config;
use browserid::domain::{DomainResolver, PublicSuffixResolver, Unscoped};
use browserid::host::{ForwardedHost, HostHeader};
use browserid::http::{HttpRequest, HttpResponse};
use browserid::IdentifierManager;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let config = match args.get(1) {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading configuration from {}", path))?,
        None => Config::default(),
    };

    let manager = build_manager(&config)?;

    let mut raw = Vec::new();
    io::stdin()
        .read_to_end(&mut raw)
        .context("reading request from stdin")?;

    let response = match HttpRequest::parse(&raw) {
        Ok(mut request) => {
            let mut response = HttpResponse::ok();
            let id = manager.get_or_create(&mut request, &mut response);
            response.set_header("content-type", "text/plain");
            response.set_body_string(&format!("{}\n", id));
            response
        }
        Err(e) => {
            log::warn!("Error parsing request: {}", e);
            HttpResponse::bad_request()
        }
    };

    log::info!("responding {}", response.status);
    io::stdout()
        .write_all(&response.to_bytes())
        .context("writing response")?;
    Ok(())
}

fn build_manager(config: &Config) -> anyhow::Result<IdentifierManager> {
    let domains: Box<dyn DomainResolver> = match &config.public_suffix_list {
        Some(path) => Box::new(
            PublicSuffixResolver::from_file(path)
                .with_context(|| format!("loading public suffix list {}", path.display()))?,
        ),
        None => {
            log::info!("no public suffix list configured, cookies will be host-only");
            Box::new(Unscoped)
        }
    };

    let manager = IdentifierManager::new(config.identifier.clone(), domains)?;
    Ok(if config.trust_forwarded_host {
        manager.with_host_resolver(ForwardedHost)
    } else {
        manager.with_host_resolver(HostHeader)
    })
}
