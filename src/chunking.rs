//! B-I-O chunking between answer mentions and token label sequences.
//!
//! "Begin"/"Inside"/"Outside" with respect to the single `ans` mention type.
//! Encoding turns gold mentions into per-token outcomes for training;
//! decoding turns predicted outcomes back into mentions.

use std::fmt;
use std::str::FromStr;

use crate::{AnswerMention, LabelParseError, Passage, TokenRange, ANSWER_MENTION_TYPE};

/// Per-token outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BioLabel {
    Begin,
    Inside,
    Outside,
}

/// One label per passage token.
pub type LabelSequence = Vec<BioLabel>;

impl BioLabel {
    /// Outcome string as exchanged with the sequence model: `B-ans`,
    /// `I-ans` or `O`.
    pub fn outcome(&self) -> String {
        match self {
            BioLabel::Begin => format!("B-{}", ANSWER_MENTION_TYPE),
            BioLabel::Inside => format!("I-{}", ANSWER_MENTION_TYPE),
            BioLabel::Outside => "O".to_string(),
        }
    }
}

impl fmt::Display for BioLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.outcome())
    }
}

impl FromStr for BioLabel {
    type Err = LabelParseError;

    /// Accepts `B-ans`/`I-ans`/`O`, also bare `B`/`I` and `O-ans`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, mention_type) = match s.split_once('-') {
            Some((prefix, mention_type)) => (prefix, Some(mention_type)),
            None => (s, None),
        };
        if mention_type.map_or(false, |t| t != ANSWER_MENTION_TYPE) {
            return Err(LabelParseError(s.to_string()));
        }
        match prefix {
            "B" => Ok(BioLabel::Begin),
            "I" => Ok(BioLabel::Inside),
            "O" => Ok(BioLabel::Outside),
            _ => Err(LabelParseError(s.to_string())),
        }
    }
}

/// Parse a sequence of outcome strings.
pub fn parse_outcomes<S: AsRef<str>>(outcomes: &[S]) -> Result<LabelSequence, LabelParseError> {
    outcomes.iter().map(|o| o.as_ref().parse()).collect()
}

/// Converts between mentions of a passage and its label sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct BioChunking;

impl BioChunking {
    pub fn new() -> Self {
        Self
    }

    /// Label every token of the passage against the given mentions.
    ///
    /// Mentions are expected to lie within the passage and not to overlap;
    /// parts outside the passage are ignored.
    pub fn encode(&self, passage: &Passage, mentions: &[AnswerMention]) -> LabelSequence {
        let range = passage.range;
        let mut labels = vec![BioLabel::Outside; range.len()];
        for mention in mentions {
            for idx in mention.range.start..=mention.range.end {
                if !range.contains(idx) {
                    continue;
                }
                labels[idx - range.start] = if idx == mention.range.start {
                    BioLabel::Begin
                } else {
                    BioLabel::Inside
                };
            }
        }
        labels
    }

    /// Reassemble mentions from a label sequence over the passage.
    ///
    /// An `Inside` with no open mention starts a new one. Labels beyond the
    /// passage end are ignored.
    pub fn decode(&self, passage: &Passage, labels: &[BioLabel]) -> Vec<AnswerMention> {
        let range = passage.range;
        let mut mentions = Vec::new();
        let mut open: Option<usize> = None;

        for (offset, label) in labels.iter().take(range.len()).enumerate() {
            let idx = range.start + offset;
            match label {
                BioLabel::Begin => {
                    if let Some(start) = open.take() {
                        mentions.push(AnswerMention::new(TokenRange::new(start, idx - 1)));
                    }
                    open = Some(idx);
                }
                BioLabel::Inside => {
                    if open.is_none() {
                        open = Some(idx);
                    }
                }
                BioLabel::Outside => {
                    if let Some(start) = open.take() {
                        mentions.push(AnswerMention::new(TokenRange::new(start, idx - 1)));
                    }
                }
            }
        }

        if let Some(start) = open {
            let last = range.start + labels.len().min(range.len()) - 1;
            mentions.push(AnswerMention::new(TokenRange::new(start, last)));
        }
        mentions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::BioLabel::{Begin as B, Inside as I, Outside as O};

    fn passage(start: usize, end: usize) -> Passage {
        Passage {
            range: TokenRange::new(start, end),
        }
    }

    fn mention(start: usize, end: usize) -> AnswerMention {
        AnswerMention::new(TokenRange::new(start, end))
    }

    #[test]
    fn test_single_token_answer() {
        // The capital of France is Paris
        let p = passage(0, 5);
        let labels = BioChunking.encode(&p, &[mention(5, 5)]);
        assert_eq!(labels, vec![O, O, O, O, O, B]);
        assert_eq!(BioChunking.decode(&p, &labels), vec![mention(5, 5)]);
    }

    #[test]
    fn test_stray_inside_starts_a_mention() {
        let p = passage(0, 3);
        assert_eq!(BioChunking.decode(&p, &[O, I, I, O]), vec![mention(1, 2)]);
    }

    #[test]
    fn test_begin_closes_open_mention() {
        let p = passage(10, 15);
        assert_eq!(
            BioChunking.decode(&p, &[B, I, B, O, I, B]),
            vec![mention(10, 11), mention(12, 12), mention(14, 14), mention(15, 15)]
        );
    }

    #[test]
    fn test_round_trip_in_passage_coordinates() {
        let p = passage(20, 29);
        let mentions = vec![mention(20, 21), mention(23, 23), mention(25, 29)];
        let labels = BioChunking.encode(&p, &mentions);
        assert_eq!(labels, vec![B, I, O, B, O, B, I, I, I, I]);
        assert_eq!(BioChunking.decode(&p, &labels), mentions);
        assert_eq!(BioChunking.encode(&p, &BioChunking.decode(&p, &labels)), labels);
    }

    #[test]
    fn test_round_trip_over_all_short_sequences() {
        let p = passage(0, 4);
        let alphabet = [B, I, O];
        for code in 0..3usize.pow(5) {
            let mut c = code;
            let labels: Vec<_> = (0..5)
                .map(|_| {
                    let label = alphabet[c % 3];
                    c /= 3;
                    label
                })
                .collect();
            // normalize stray Inside tags to Begin for the well-formed form
            let well_formed: Vec<_> = labels
                .iter()
                .enumerate()
                .map(|(i, l)| match (l, i.checked_sub(1).map(|prev| labels[prev])) {
                    (I, None) | (I, Some(O)) => B,
                    _ => *l,
                })
                .collect();
            let decoded = BioChunking.decode(&p, &labels);
            assert_eq!(BioChunking.encode(&p, &decoded), well_formed, "{:?}", labels);
        }
    }

    #[test]
    fn test_outcome_strings() {
        assert_eq!(B.to_string(), "B-ans");
        assert_eq!(I.to_string(), "I-ans");
        assert_eq!(O.to_string(), "O");
        assert_eq!(
            parse_outcomes(&["B-ans", "I", "O", "O-ans"]).unwrap(),
            vec![B, I, O, O]
        );
        assert_eq!(
            "B-loc".parse::<BioLabel>(),
            Err(LabelParseError("B-loc".to_string()))
        );
        assert!("X".parse::<BioLabel>().is_err());
    }

    #[test]
    fn test_empty_labels_decode_to_nothing() {
        assert!(BioChunking.decode(&passage(0, 2), &[]).is_empty());
        assert!(BioChunking.decode(&passage(0, 2), &[O, O, O]).is_empty());
    }
}
