use std::fmt::Write;

use unicode_width::UnicodeWidthStr;

use crate::{
    Alignment, AnswerMention, BioLabel, Passage, PassagesView, TaggerResult, Token, TokenRange,
};

/// A marked span, in passage-relative token positions.
struct IncludedAttr {
    range: TokenRange,
    value: String,
}

/// Renders the tokens of one passage with `╰──╯` markers under mentions,
/// labels and alignment edits.
pub struct PassageDisplay<'a> {
    tokens: &'a [Token],
    passage: Passage,
    include_attrs: Vec<IncludedAttr>,
}

// The  capital  of  France  is  Paris
//                               ╰───╯ans
//                               ╰───╯B-ans
impl<'a> std::fmt::Display for PassageDisplay<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const SPACE_PADDING: usize = 2;
        let mut token_idx_to_start_display_char_idx = Vec::new();
        let mut token_idx_to_end_display_char_idx = Vec::new();
        let mut opening_line = String::new();
        for (idx, token) in self.tokens.iter().enumerate() {
            if idx > 0 {
                opening_line.extend(std::iter::repeat(' ').take(SPACE_PADDING));
            }
            token_idx_to_start_display_char_idx.push(UnicodeWidthStr::width(&*opening_line));
            opening_line.push_str(&token.text);
            token_idx_to_end_display_char_idx.push(UnicodeWidthStr::width(&*opening_line));
        }

        f.write_str(&opening_line)?;

        for attr in self.include_attrs.iter() {
            f.write_char('\n')?;

            let start_char_idx = token_idx_to_start_display_char_idx[attr.range.start];
            for _ in 0..start_char_idx {
                f.write_char(' ')?;
            }

            f.write_char('╰')?;

            let end_char_idx = token_idx_to_end_display_char_idx[attr.range.end];
            let char_len = end_char_idx - start_char_idx;
            for _ in (start_char_idx + 1)..end_char_idx.saturating_sub(1) {
                f.write_char('─')?;
            }

            if char_len > 1 {
                f.write_char('╯')?;
            }

            f.write_str(&attr.value)?;
        }

        Ok(())
    }
}

impl<'a> PassageDisplay<'a> {
    pub fn new(view: &'a PassagesView, passage: &Passage) -> TaggerResult<Self> {
        Ok(PassageDisplay {
            tokens: view.tokens_covered(passage)?,
            passage: *passage,
            include_attrs: Vec::new(),
        })
    }

    /// Mark mentions lying within the passage; others are ignored.
    pub fn include_mentions(&mut self, mentions: &[AnswerMention]) {
        let mut covered: Vec<_> = mentions
            .iter()
            .filter(|m| self.passage.range.covers(&m.range))
            .collect();
        covered.sort();
        for mention in covered {
            self.include_attrs.push(IncludedAttr {
                range: mention.range.relative_to(&self.passage.range),
                value: mention.mention_type().to_string(),
            });
        }
    }

    /// Mark every token not labeled `O`.
    pub fn include_labels(&mut self, labels: &[BioLabel]) {
        for (idx, label) in labels.iter().enumerate().take(self.tokens.len()) {
            if *label == BioLabel::Outside {
                continue;
            }
            self.include_attrs.push(IncludedAttr {
                range: TokenRange::single(idx),
                value: label.outcome(),
            });
        }
    }

    /// Mark the edit applied to every aligned token.
    pub fn include_alignment(&mut self, alignment: &Alignment) {
        for idx in 0..self.tokens.len() {
            let edit = match alignment.edit(idx) {
                Some(edit) => edit,
                None => continue,
            };
            let value = match &edit.rename_to {
                Some(target) => format!("{}({})", edit.kind, target),
                None => edit.kind.to_string(),
            };
            self.include_attrs.push(IncludedAttr {
                range: TokenRange::single(idx),
                value,
            });
        }
    }

    /// Takes self
    pub fn with_mentions(mut self, mentions: &[AnswerMention]) -> Self {
        self.include_mentions(mentions);
        self
    }

    /// Takes self
    pub fn with_labels(mut self, labels: &[BioLabel]) -> Self {
        self.include_labels(labels);
        self
    }

    /// Takes self
    pub fn with_alignment(mut self, alignment: &Alignment) -> Self {
        self.include_alignment(alignment);
        self
    }
}
