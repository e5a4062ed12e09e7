use littre_parser::core::matcher::HEADWORD_ATTR;
use littre_parser::{LetterSource, XmlDirectoryLoader};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("./xml"));
    if !data_dir.exists() {
        println!("No {} directory found. Place the XMLittré a.xml … z.xml files there.", data_dir.display());
        return Ok(());
    }

    let loader = XmlDirectoryLoader::new(&data_dir);
    let present: String = ('a'..='z').filter(|c| loader.letter_path(*c).exists()).collect();
    loader.preload(&present)?;

    for letter in present.chars() {
        let tree = loader.letter_tree(letter)?;
        let entries: Vec<_> = tree.entries().collect();
        println!("[{}] {} entries", letter, entries.len());
        for entry in entries.iter().take(5) {
            println!("    {}", entry.attribute(HEADWORD_ATTR).unwrap_or("?"));
        }
    }

    Ok(())
}
