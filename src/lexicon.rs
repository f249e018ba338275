// Copyright (C) 2020-2024 Andy Kurnia.

use super::error;

// One word per line (first column if comma-separated). Blank lines are skipped
// and words are uppercased, so lowercase never reads as designated blanks.
pub fn read_word_list<R: std::io::Read>(reader: R) -> error::Returns<Vec<String>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut words = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        match record.get(0) {
            Some(word) if !word.is_empty() => words.push(word.to_uppercase()),
            _ => {}
        }
    }
    Ok(words)
}

pub fn read_word_list_file(path: &str) -> error::Returns<Vec<String>> {
    let f = std::fs::File::open(path)?;
    let words = read_word_list(f)?;
    log::debug!("read {} words from {}", words.len(), path);
    Ok(words)
}
