use std::io::prelude::*;

const SOLUTIONS_RAW: &str = include_str!("data/solutions.txt");
const GUESSES_RAW: &str = include_str!("data/guesses.txt");

fn main() {
    println!("cargo:rerun-if-changed=data/solutions.txt");
    println!("cargo:rerun-if-changed=data/guesses.txt");

    let out_dir = std::path::PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let mut f = std::fs::File::create(out_dir.join("dictionary.rs"))
        .expect("could not create file in OUT_DIR");

    // `solutions` carries a frequency weight used as the default solution prior;
    // `guesses` is the full allowed-guess vocabulary (always a superset of solutions).
    let mut solutions = Vec::from_iter(SOLUTIONS_RAW.lines().map(|line| {
        let (word, count) = line
            .split_once(' ')
            .expect("every solutions.txt line is word + space + frequency");
        assert_eq!(word.len(), 5, "solution '{}' is not 5 letters", word);
        let count: u32 = count.parse().expect("every frequency is a number");
        (word, count)
    }));
    solutions.sort_unstable_by_key(|&(word, _)| word);

    let mut guesses = Vec::from_iter(GUESSES_RAW.lines().map(|word| {
        assert_eq!(word.len(), 5, "guess '{}' is not 5 letters", word);
        word
    }));
    guesses.sort_unstable();
    guesses.dedup();

    for &(word, _) in &solutions {
        assert!(
            guesses.binary_search(&word).is_ok(),
            "solution '{}' must also be an allowed guess",
            word
        );
    }

    writeln!(
        f,
        "pub const SOLUTIONS: [(&str, u32); {}] = [",
        solutions.len()
    )
    .unwrap();
    for (word, count) in &solutions {
        writeln!(f, "    (\"{}\", {}),", word, count).unwrap();
    }
    writeln!(f, "];").unwrap();

    writeln!(f, "pub const GUESSES: [&str; {}] = [", guesses.len()).unwrap();
    for word in &guesses {
        writeln!(f, "    \"{}\",", word).unwrap();
    }
    writeln!(f, "];").unwrap();

    let mut solution_index = phf_codegen::Map::new();
    for (i, &(word, _)) in solutions.iter().enumerate() {
        solution_index.entry(word, &i.to_string());
    }
    writeln!(
        f,
        "pub static SOLUTION_INDEX: phf::Map<&'static str, usize> = {};",
        solution_index.build()
    )
    .unwrap();

    let mut guess_index = phf_codegen::Map::new();
    for (i, &word) in guesses.iter().enumerate() {
        guess_index.entry(word, &i.to_string());
    }
    writeln!(
        f,
        "pub static GUESS_INDEX: phf::Map<&'static str, usize> = {};",
        guess_index.build()
    )
    .unwrap();
}
