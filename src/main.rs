//! RDF Template - command-line front end
//!
//! Loads an RDF file into an in-memory store and runs one template operation on it.
//!
//! Usage:
//!   rdf-template --data data.ttl select "SELECT ?s ?o WHERE { ?s ?p ?o }"
//!   rdf-template --data data.nt debug

use clap::{Parser, Subcommand};
use log::info;
use oxigraph::io::RdfFormat;
use oxigraph::model::Triple;
use oxigraph::store::Store;
use rdf_template::{QueryTemplate, TemplateError};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "rdf-template")]
#[command(about = "Run template queries against an RDF file", long_about = None)]
struct Args {
    /// RDF file to load into the store
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Data format as a file extension (ttl, nt, rdf, ...), defaults to the file's own
    #[arg(short, long)]
    format: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every solution as a JSON object per line
    Select { query: String },
    /// Print the value of the last variable of the last solution
    #[command(name = "string")]
    SelectString { query: String },
    /// Print the constructed triples as N-Triples
    Construct { query: String },
    /// Print every triple of the store as a table
    Debug,
}

fn load(store: &Store, path: &Path, format: Option<&str>) -> Result<(), TemplateError> {
    let extension = format
        .or_else(|| path.extension().and_then(|e| e.to_str()))
        .unwrap_or_default();
    let format = RdfFormat::from_extension(extension).ok_or_else(|| {
        TemplateError::Loader(format!("Unsupported RDF format '{}'", extension))
    })?;
    let reader = BufReader::new(File::open(path)?);
    store.load_from_reader(format, reader)?;
    info!("Loaded {} ({:?}), {} quads", path.display(), format, store.len()?);
    Ok(())
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::new()?;
    if let Some(path) = &args.data {
        load(&store, path, args.format.as_deref())?;
    }
    let template = QueryTemplate::with_store(store);

    match args.command {
        Command::Select { query } => {
            for row in template.select_generic_map(&query)?.unwrap_or_default() {
                println!("{}", serde_json::to_string(&row)?);
            }
        }
        Command::SelectString { query } => {
            if let Some(value) = template.select_string(&query)? {
                println!("{}", value);
            }
        }
        Command::Construct { query } => {
            let graph = template.construct(&query)?;
            for quad in graph.iter() {
                println!("{} .", Triple::from(quad?));
            }
        }
        Command::Debug => template.debug()?,
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
