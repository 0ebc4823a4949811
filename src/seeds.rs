//! Seed data: the built-in riddle bank.
//!
//! Entries are (prompt, display answer). The letter sequence is derived from the
//! display answer, and the catalog files each entry under the length of that
//! sequence, so the comments below are only a reading aid.

use crate::catalog::letters_from_display;
use crate::domain::{RiddleEntry, RiddleSource};

const SEED_RIDDLES: &[(&str, &str)] = &[
  // 3
  ("I buzz and make honey. What am I?", "BEE"),
  ("A feline pet. What is it?", "CAT"),
  ("Man's best friend. What is it?", "DOG"),
  ("What we breathe. What is it?", "AIR"),
  ("Opposite of night. What is it?", "DAY"),
  // 4
  ("What has bark but no bite?", "TREE"),
  ("What comes down but never goes up?", "RAIN"),
  ("I'm red all over. What planet am I?", "MARS"),
  ("What has teeth but can't bite?", "COMB"),
  ("I have a tail and a head but no body. What am I?", "COIN"),
  // 5
  ("What has hands but can't clap?", "CLOCK"),
  ("What gets wet while drying?", "TOWEL"),
  ("What runs but never walks?", "WATER"),
  ("I'm your home, third from the Sun. What am I?", "EARTH"),
  ("What has keys but can't open locks?", "PIANO"),
  ("What did the buffalo say to her son on the first day of school?", "BISON"),
  ("What has a tongue but cannot talk?", "A SHOE"),
  // 6
  ("What has a neck but no head?", "BOTTLE"),
  ("I'm full of holes but hold water. What am I?", "SPONGE"),
  ("Where you go to learn. What is it?", "SCHOOL"),
  ("Planet with the most bling. What am I?", "SATURN"),
  ("I help you write but I'm not a pen. What am I?", "PENCIL"),
  // 7
  ("I'm the biggest gas giant. What am I?", "JUPITER"),
  ("I shoot up from Earth, hot and bright. What am I?", "VOLCANO"),
  ("What is a tornado's favorite game?", "TWISTER"),
  ("I'm closest to the Sun. What am I?", "MERCURY"),
  ("I guide people but only point. What am I?", "COMPASS"),
  ("I can travel 100 miles an hour but never leave the room. What am I?", "A SNEEZE"),
  // 8
  ("I'm full of words and pictures. What am I?", "TEXTBOOK"),
  ("I carry knowledge on my back. What am I?", "BACKPACK"),
  ("I'm sweet and sticky on a stick. What am I?", "POPSICLE"),
  ("It belongs to you, but your friends use it more.", "YOUR NAME"),
  ("What did one volcano say to the other?", "I LAVA YOU"),
  ("What kind of tree fits in your hand?", "PALM TREE"),
  ("What word has 26 letters but only three syllables?", "ALPHABET"),
  // 9
  ("What has a ring but no finger?", "TELEPHONE"),
  ("What has ears but cannot hear?", "CORNFIELD"),
  ("What happens when a vampire goes in the snow?", "FROSTBITE"),
  ("What kind of music do mummies love?", "WRAP MUSIC"),
  ("What do horses do when it's time for bed?", "HIT THE HAY"),
  ("What do you call a cold puppy?", "A CHILI DOG"),
  ("I am always in front of you and never behind you. What am I?", "THE FUTURE"),
  // 10
  ("I'm made of sand and might have a moat. What am I?", "SANDCASTLE"),
  ("What do you call two witches living together?", "BROOMMATES"),
  ("Which side of the turkey has the most feathers?", "THE OUTSIDE"),
  ("How do astronomers organize a party?", "THEY PLANET"),
  ("What's the easiest building to lift?", "LIGHTHOUSE"),
  ("What do you call an anxious bug?", "A JITTERBUG"),
  ("The more you take, the more you leave behind. What am I?", "FOOTPRINTS"),
  ("What do you find at the end of the rainbow?", "THE LETTER W"),
  ("Solve the problems below to uncover a phrase!", "YOU GOT THIS"),
  ("What do you call a sleeping bull?", "A BULLDOZER"),
  // 11
  ("What do you give a vampire when they're sick?", "COFFIN DROPS"),
  ("What do you call two birds in love?", "TWEETHEARTS"),
  ("What are ten things you can always count on?", "YOUR FINGERS"),
  ("What is a rabbit's favorite dance?", "THE BUNNY HOP"),
  ("What kind of milk comes from a pampered cow?", "SPOILED MILK"),
  ("What kind of band can't play music?", "A RUBBER BAND"),
  ("Where is the ocean the deepest?", "ON THE BOTTOM"),
  ("Where do math teachers go on vacation?", "TIMES SQUARE"),
  // 12
  ("What has wheels and flies but is not an airplane?", "GARBAGE TRUCK"),
  ("What does a clam do on its birthday?", "SHELLEBRATES"),
  ("What kind of candy do you eat on a playground?", "RECESS PIECES"),
  ("What's a vampire's favorite fruit?", "BLOOD ORANGES"),
  ("What kind of car does a sheep like to drive?", "A LAMBORGHINI"),
  ("Where do penguins go to vote?", "THE NORTH POLL"),
  // 13
  ("What do you say to a kangaroo on its birthday?", "HOPPY BIRTHDAY"),
  ("What rock group has four men who can't sing?", "MOUNT RUSHMORE"),
  ("How do you find a cheetah in the dark?", "USE A SPOTLIGHT"),
  ("What do you call a happy cowboy?", "A JOLLY RANCHER"),
  ("What do you call a funny mountain?", "HILARIOUS HILL"),
  // 14
  ("What do you get when you cross a fish with an elephant?", "SWIMMING TRUNKS"),
  ("What are two things you can never have for breakfast?", "LUNCH AND DINNER"),
  ("What do you call an alligator in a vest?", "AN INVESTIGATOR"),
  ("Where do surfers go for an education?", "BOARDING SCHOOL"),
  ("What has a lot of needles but can't sew?", "A CHRISTMAS TREE"),
  // 15
  ("How do fish pay for groceries?", "WITH SAND DOLLARS"),
  ("What do you call a dog magician?", "LABRACADABRADOR"),
  ("Solve the problems below to uncover a word!", "ACCOMPLISHMENTS"),
  ("Solve the problems below to uncover a word!", "EXTRAORDINARILY"),
  ("Solve the problems below to uncover a word!", "RESOURCEFULNESS"),
  ("Solve the problems below to uncover a word!", "KINDHEARTEDNESS"),
];

/// Built-in riddles covering answer lengths 3 through 15.
pub fn seed_riddles() -> Vec<RiddleEntry> {
  SEED_RIDDLES
    .iter()
    .map(|(prompt, answer)| RiddleEntry {
      prompt: (*prompt).to_string(),
      display_answer: (*answer).to_string(),
      letters: letters_from_display(answer),
      source: RiddleSource::Seed,
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::BTreeSet;

  #[test]
  fn bank_covers_three_through_fifteen() {
    let lengths: BTreeSet<usize> = seed_riddles().iter().map(|r| r.len()).collect();
    for n in 3..=15 {
      assert!(lengths.contains(&n), "no seed riddle of length {n}");
    }
  }

  #[test]
  fn letters_are_uppercase_ascii() {
    for r in seed_riddles() {
      assert!(r.letters.chars().all(|c| c.is_ascii_uppercase()), "{}", r.display_answer);
    }
  }
}
