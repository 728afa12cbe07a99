// Test complete flow of the application
// Run with `cargo test --test e2e_test`

use std::fs;

use regex::Regex;
use tokmatch::{Doc, EntityDefinition, Match, MatcherBuilder};

#[test]
fn e2e_test() {
    // Initialize the logger
    let _ = env_logger::builder().is_test(true).try_init();

    // Initialize the regex for newlines. It is used to make the tests platform independent.
    let rx_newline: Regex = Regex::new(r"\r?\n|\r").unwrap();

    // Iterate over all json files in the data directory that contain entity definitions
    for entry in fs::read_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data")).unwrap() {
        let entry = entry.unwrap();
        let path = entry.path();
        if path.extension().unwrap() != "json" {
            continue;
        }

        println!("--------------------------------------------------");
        println!("Entry: {:?}", entry.file_name());
        println!("--------------------------------------------------");

        // Read the json file
        let file = fs::File::open(&path).unwrap();
        let entity_definitions: Vec<EntityDefinition> = serde_json::from_reader(file)
            .unwrap_or_else(|e| panic!("**** Failed to read json file {}: {}", path.display(), e));

        // Create a matcher from the matcher builder
        let matcher = MatcherBuilder::new()
            .add_entity_definitions(&entity_definitions)
            .build()
            .unwrap();

        // Open the input file which has the same base name as the json file but with a .input
        // extension. Each line is a document of whitespace separated words.
        let input_path = path.with_extension("input");
        let input = fs::read_to_string(&input_path).unwrap();
        let input = rx_newline.replace_all(&input, "\n");
        let mut docs: Vec<Doc> = input
            .lines()
            .map(|line| Doc::from_words(&line.split_whitespace().collect::<Vec<_>>()))
            .collect();

        // Find all matches in all documents
        let matches: Vec<Vec<Match>> = matcher.pipe(docs.iter_mut()).unwrap();

        println!("Matches:\n{}\n", serde_json::to_string(&matches).unwrap());
        for (doc, doc_matches) in docs.iter().zip(&matches) {
            for ma in doc_matches {
                println!("{}, Entity: {} ", doc.span_text(ma.span()).unwrap(), ma);
            }
        }
        println!("Matches count: {}", matches.iter().map(Vec::len).sum::<usize>());

        // Open the expected output file which has the same base name as the json file but with a
        // .matches extension.
        let matches_file_path = path.with_extension("matches");
        let matches_file = fs::File::open(&matches_file_path).unwrap();
        let expected_matches: Vec<Vec<Match>> = serde_json::from_reader(&matches_file).unwrap();

        // Compare the matches
        assert_eq!(matches, expected_matches);
    }
}
