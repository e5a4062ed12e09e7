// src/main.rs
use clap::Parser;
use littre_parser::{Dictionary, LittreError, RenderOptions};
use log::{error, info};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "littre")]
#[command(about = "Print the definition of a word from the XMLittré dictionary")]
struct Args {
    /// Words to look up
    #[arg(required = true)]
    words: Vec<String>,

    /// Directory holding the a.xml … z.xml letter files
    #[arg(long, env = "LITTRE_XML_DIR", default_value = "xml")]
    dir: PathBuf,

    /// Leave citations out of the rendering
    #[arg(long)]
    no_citations: bool,

    /// Leave out the Synonymes section
    #[arg(long)]
    no_synonyms: bool,

    /// Leave out the Historique section
    #[arg(long)]
    no_history: bool,

    /// Leave out the Étymologie section
    #[arg(long)]
    no_etymology: bool,

    /// Print the extracted entries as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let options = RenderOptions {
        suppress_citations: args.no_citations,
        suppress_synonyms: args.no_synonyms,
        suppress_history: args.no_history,
        suppress_etymology: args.no_etymology,
    };
    info!("reading dictionary from {}", args.dir.display());
    let dictionary = Dictionary::open(&args.dir);

    let mut missing = 0;
    for word in &args.words {
        match render_word(&dictionary, word, &options, args.json) {
            Ok(text) => println!("{}", text),
            Err(e) => match e.downcast_ref::<LittreError>() {
                Some(LittreError::EntryNotFound(word)) => {
                    eprintln!("Aucune entrée pour « {} »", word);
                    missing += 1;
                }
                _ => {
                    error!("lookup of {:?} failed: {}", word, e);
                    return Err(e);
                }
            },
        }
    }

    if missing > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn render_word(
    dictionary: &Dictionary,
    word: &str,
    options: &RenderOptions,
    json: bool,
) -> anyhow::Result<String> {
    if json {
        let definition = dictionary.lookup(word)?;
        Ok(serde_json::to_string_pretty(&definition)?)
    } else {
        Ok(dictionary.define(word, options)?)
    }
}
