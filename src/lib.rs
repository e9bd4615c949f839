use std::fmt;
use std::str::FromStr;

mod network;

use network::FlowNetwork;

pub const NUM_LETTERS: usize = 26;

// Set of uppercase letters as a 26 bit mask, bit 0 = 'A' .. bit 25 = 'Z'.
// Used both for the faces of a die and for the single letter at one position
// of a word being spelled.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LetterSet(u32);

impl LetterSet {
    pub const EMPTY: LetterSet = LetterSet(0);

    // Set containing just `letter`. Assumes `letter` is in [A-Z]; anything
    // else is a contract violation by the caller and sets an undefined bit.
    pub fn single(letter: u8) -> LetterSet {
        debug_assert!(letter.is_ascii_uppercase());
        LetterSet(1 << (letter - b'A'))
    }

    pub fn contains(self, letter: u8) -> bool {
        self.intersects(LetterSet::single(letter))
    }

    pub fn intersects(self, other: LetterSet) -> bool {
        self.0 & other.0 != 0
    }
}

impl FromStr for LetterSet {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut mask = 0u32;
        for b in s.bytes() {
            if !b.is_ascii_uppercase() {
                return Err("letters must be in [A-Z]");
            }
            mask |= 1 << (b - b'A');
        }
        Ok(LetterSet(mask))
    }
}

impl fmt::Display for LetterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..NUM_LETTERS {
            if self.0 & (1 << i) != 0 {
                write!(f, "{}", (b'A' + i as u8) as char)?;
            }
        }
        Ok(())
    }
}

// A dice inventory and the flow network used to match dice against words.
// The die side of the network is built once; each spell() call attaches the
// word side, runs the matching to saturation, reads the result, and tears
// the word side back down, so calls are independent of one another.
pub struct Network {
    flow: FlowNetwork,
    dice: Vec<LetterSet>,
}

impl Network {
    pub fn with_dice(dice: &[LetterSet]) -> Network {
        let mut flow = FlowNetwork::new();
        for &d in dice {
            flow.add_die(d);
        }
        Network {
            flow,
            dice: dice.to_vec(),
        }
    }

    pub fn dice(&self) -> &[LetterSet] {
        &self.dice
    }

    // Decides whether `word` can be spelled with each letter on a distinct
    // die. On success returns one 0-based die index per letter position, in
    // word order; indices never repeat within a word. Returns None when no
    // such assignment exists. Assumes `word` is uppercase [A-Z]; the empty
    // word is trivially spellable with an empty assignment.
    //
    // A word is spellable iff the maximum flow equals the word length, since
    // every capacity-1 path from source to sink claims one die for one
    // letter position.
    pub fn spell(&mut self, word: &str) -> Option<Vec<usize>> {
        let letters: Vec<LetterSet> = word.bytes().map(LetterSet::single).collect();
        let sink = self.flow.begin_word(&letters);
        self.flow.connect_dice_to_letters();
        self.flow.saturate(sink);
        let assignment = self.flow.assignment(sink);
        self.flow.end_word();
        assignment
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.flow)
    }
}

// Parses one die per input line into an inventory; line order defines the
// 0-based die indices reported by spell().
pub fn parse_dice<'a, I: IntoIterator<Item = &'a str>>(
    lines: I,
) -> Result<Vec<LetterSet>, &'static str> {
    lines.into_iter().map(LetterSet::from_str).collect()
}

mod test {
    #[allow(unused_imports)]
    use super::*;
    #[allow(unused_imports)]
    use itertools::Itertools;

    #[allow(dead_code)]
    fn network(dice: &[&str]) -> Network {
        Network::with_dice(&parse_dice(dice.iter().copied()).unwrap())
    }

    mod letter_set_from_str {
        #[allow(unused_imports)]
        use super::*;

        macro_rules! test {
            ($name: ident, $s: expr, $letters: expr) => {
                #[test]
                fn $name() {
                    let set = LetterSet::from_str($s);
                    match $letters {
                        Ok(l) => {
                            let set = set.unwrap();
                            for b in b'A'..=b'Z' {
                                assert_eq!(
                                    set.contains(b),
                                    l.contains(b as char),
                                    "letter={}",
                                    b as char
                                );
                            }
                        }
                        Err(e) => assert_eq!(set, Err(e)),
                    }
                }
            };
        }

        test!(empty, "", Ok::<&str, &str>(""));
        test!(single, "Q", Ok::<&str, &str>("Q"));
        test!(all_faces, "ABCDEF", Ok::<&str, &str>("ABCDEF"));
        test!(repeated_faces, "AAB", Ok::<&str, &str>("AB"));
        test!(unordered, "ZQM", Ok::<&str, &str>("MQZ"));
        test!(lowercase, "abc", Err::<&str, &str>("letters must be in [A-Z]"));
        test!(digit, "A1", Err::<&str, &str>("letters must be in [A-Z]"));
        test!(space, "A B", Err::<&str, &str>("letters must be in [A-Z]"));
    }

    mod letter_set_format {
        #[allow(unused_imports)]
        use super::*;

        macro_rules! test {
            ($name: ident, $s: expr, $expected: expr) => {
                #[test]
                fn $name() {
                    assert_eq!(format!("{}", LetterSet::from_str($s).unwrap()), $expected);
                }
            };
        }

        test!(empty, "", "");
        test!(sorted, "CAB", "ABC");
        test!(dedup, "AABBA", "AB");
        test!(ends, "ZA", "AZ");
    }

    mod spell {
        #[allow(unused_imports)]
        use super::*;

        macro_rules! test {
            ($name: ident, $dice: expr, $word: expr, $expected: expr) => {
                #[test]
                fn $name() {
                    let expected: Option<Vec<usize>> = $expected;
                    assert_eq!(network(&$dice).spell($word), expected);
                }
            };
        }

        test!(one_letter, ["AB", "CD"], "A", Some(vec![0]));
        test!(two_dice, ["AB", "CD"], "AC", Some(vec![0, 1]));
        test!(second_face, ["AB", "CD"], "AD", Some(vec![0, 1]));
        test!(reversed, ["AB", "CD"], "CA", Some(vec![1, 0]));
        test!(repeat_needs_two_dice, ["AB", "CD"], "AA", None);
        test!(repeated_faces_one_use, ["AAB"], "AA", None);
        test!(one_die_per_letter, ["A", "B", "C"], "ABC", Some(vec![0, 1, 2]));
        test!(missing_letter, ["AB", "CD"], "AZ", None);
        test!(longer_than_inventory, ["AB"], "ABA", None);
        test!(empty_word, ["AB", "CD"], "", Some(vec![]));
        test!(no_dice, [""; 0], "A", None);
        test!(empty_die_matches_nothing, [""], "A", None);
        // A first-match greedy assignment fails here: the only die showing E
        // must be kept for the E even though it also shows the B.
        test!(rerouted, ["EB", "BC"], "BE", Some(vec![1, 0]));
        test!(
            all_dice_rerouted,
            ["AB", "AC", "AD"],
            "DCA",
            Some(vec![2, 1, 0])
        );
    }

    mod spell_properties {
        #[allow(unused_imports)]
        use super::*;
        #[allow(unused_imports)]
        use itertools::Itertools;

        // Assignment search by brute force, used as an oracle: try every
        // ordered selection of distinct dice against the word.
        #[allow(dead_code)]
        fn brute_force(dice: &[LetterSet], word: &str) -> bool {
            if word.len() > dice.len() {
                return false;
            }
            (0..dice.len()).permutations(word.len()).any(|assignment| {
                assignment
                    .iter()
                    .zip(word.bytes())
                    .all(|(&d, l)| dice[d].contains(l))
            })
        }

        #[test]
        fn sound_assignments() {
            let dice = parse_dice(["ABC", "BCD", "CDE", "AAC", "XY"]).unwrap();
            let mut network = Network::with_dice(&dice);
            for word in ["ACE", "CAB", "DAD", "XXX", "BCA", "CCC", "DECADE"] {
                if let Some(assignment) = network.spell(word) {
                    assert_eq!(assignment.len(), word.len(), "word={}", word);
                    assert!(
                        assignment.iter().all_unique(),
                        "word={} assignment={:?}",
                        word,
                        assignment
                    );
                    for (&d, l) in assignment.iter().zip(word.bytes()) {
                        assert!(network.dice()[d].contains(l), "word={} die={}", word, d);
                    }
                }
            }
        }

        #[test]
        fn complete_against_brute_force() {
            let dice = parse_dice(["AB", "BC", "CA", "AAC"]).unwrap();
            let mut network = Network::with_dice(&dice);
            let letters = ['A', 'B', 'C', 'D'];
            // Every word up to length 3 over a small alphabet.
            for len in 0..=3 {
                for word in (0..len).map(|_| letters.iter()).multi_cartesian_product() {
                    let word: String = word.into_iter().collect();
                    assert_eq!(
                        network.spell(&word).is_some(),
                        brute_force(&dice, &word),
                        "word={}",
                        word
                    );
                }
            }
        }

        #[test]
        fn words_evaluated_independently() {
            let dice = parse_dice(["AB", "BC", "CA"]).unwrap();
            let mut fresh = Network::with_dice(&dice);
            let expected = fresh.spell("CAB");

            let mut network = Network::with_dice(&dice);
            for word in ["ABC", "AA", "B", "CAB", "ZZZ"] {
                network.spell(word);
            }
            assert_eq!(network.spell("CAB"), expected);
        }

        #[test]
        fn same_word_twice() {
            let mut network = network(&["AB", "CD", "EF"]);
            let first = network.spell("ACE");
            assert_eq!(network.spell("ACE"), first);
        }
    }
}
