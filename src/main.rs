use itertools::Itertools;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process;
use structopt::StructOpt;
use worddice::{parse_dice, Network};

#[derive(Debug, StructOpt)]
struct Opt {
    /// File with one die per line, each line the die's face letters [A-Z].
    /// Line order defines the die indices reported in the output.
    #[structopt(parse(from_os_str))]
    dice_file: PathBuf,
    /// File with one uppercase word per line.
    #[structopt(parse(from_os_str))]
    word_file: PathBuf,
}

fn read_lines(path: &Path) -> std::io::Result<Vec<String>> {
    BufReader::new(File::open(path)?).lines().collect()
}

// One output line per word: the comma-joined die indices for a spellable
// word, the original's "Cannot spell" message otherwise.
fn format_result(word: &str, assignment: Option<&[usize]>) -> String {
    match assignment {
        Some(assignment) => format!("{}: {}", assignment.iter().join(","), word),
        None => format!("Cannot spell {}", word),
    }
}

fn main() {
    let opt = Opt::from_args();

    let dice_lines = read_lines(&opt.dice_file).unwrap_or_else(|_| {
        eprintln!("Error: Could not open dice file");
        process::exit(1);
    });
    let words = read_lines(&opt.word_file).unwrap_or_else(|_| {
        eprintln!("Error: Could not open word file");
        process::exit(1);
    });

    let dice = parse_dice(dice_lines.iter().map(String::as_str)).unwrap_or_else(|e| {
        eprintln!("Error: bad dice file: {}", e);
        process::exit(1);
    });

    let mut network = Network::with_dice(&dice);
    for word in &words {
        if !word.bytes().all(|b| b.is_ascii_uppercase()) {
            eprintln!("Error: bad word file: letters must be in [A-Z]");
            process::exit(1);
        }
        println!("{}", format_result(word, network.spell(word).as_deref()));
    }
}

mod test {
    #[allow(unused_imports)]
    use super::*;

    macro_rules! test {
        ($name: ident, $word: expr, $assignment: expr, $expected: expr) => {
            #[test]
            fn $name() {
                let assignment: Option<Vec<usize>> = $assignment;
                assert_eq!(format_result($word, assignment.as_deref()), $expected);
            }
        };
    }

    test!(spellable, "ACE", Some(vec![0, 2, 4]), "0,2,4: ACE");
    test!(single_letter, "A", Some(vec![3]), "3: A");
    test!(empty_word, "", Some(vec![]), ": ");
    test!(unspellable, "AA", None, "Cannot spell AA");
}
