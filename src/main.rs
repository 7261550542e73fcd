use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use folio::site::{Listing, Site};
use std::path::Path;
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("folio=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let project = Arg::with_name("project")
        .long("project")
        .short("p")
        .takes_value(true)
        .default_value(".")
        .help("The directory containing folio.yaml, or any directory below it");

    let matches = App::new("folio")
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("list")
                .about("Prints a listing page, optionally filtered by a search query")
                .arg(project.clone())
                .arg(
                    Arg::with_name("query")
                        .long("query")
                        .short("q")
                        .takes_value(true)
                        .default_value("")
                        .help("Search string; matched case-insensitively against titles, summaries, and tags"),
                )
                .arg(
                    Arg::with_name("page")
                        .long("page")
                        .takes_value(true)
                        .default_value("1")
                        .help("The 1-based listing page"),
                )
                .arg(
                    Arg::with_name("json")
                        .long("json")
                        .help("Print the listing as JSON"),
                ),
        )
        .subcommand(
            SubCommand::with_name("tags")
                .about("Prints tag counts, most used first")
                .arg(project)
                .arg(
                    Arg::with_name("json")
                        .long("json")
                        .help("Print the counts as a JSON object"),
                ),
        )
        .get_matches();

    let result = match matches.subcommand() {
        ("list", Some(matches)) => list(matches),
        ("tags", Some(matches)) => tags(matches),
        _ => Ok(()),
    };

    if let Err(err) = result {
        eprintln!("ERROR {}", err);
        std::process::exit(1);
    }
}

fn load(matches: &ArgMatches) -> Result<Site> {
    // `project` has a default value
    let project = matches.value_of("project").unwrap_or(".");
    Ok(Site::from_directory(Path::new(project))?)
}

fn list(matches: &ArgMatches) -> Result<()> {
    let site = load(matches)?;
    let page: usize = matches.value_of("page").unwrap_or("1").parse()?;
    let query = matches.value_of("query").unwrap_or("");
    let listing = site.listing(page, query)?;

    if matches.is_present("json") {
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        print_listing(&listing);
    }
    Ok(())
}

fn print_listing(listing: &Listing) {
    for post in &listing.posts {
        println!("{}  {}  /{}", post.date, post.title, post.path);
        if !post.tags.is_empty() {
            println!("            [{}]", post.tags.join(", "));
        }
    }
    if listing.posts.is_empty() {
        println!("No posts found.");
    }
    if let (Some(prev), Some(next)) = (&listing.prev, &listing.next) {
        println!(
            "\n{}  {} of {}  {}",
            prev, listing.pagination.current_page, listing.pagination.total_pages, next
        );
    }
}

fn tags(matches: &ArgMatches) -> Result<()> {
    let site = load(matches)?;
    if matches.is_present("json") {
        println!("{}", serde_json::to_string_pretty(&site.tags)?);
    } else {
        for tag in site.tags.sidebar("") {
            println!("{}", tag);
        }
    }
    Ok(())
}
