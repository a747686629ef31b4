//! Ratio entry line - type n/d to retune the selected voice

use ratio_voices::{
    engine::EnsembleCommand,
    ratio::{Ratio, RatioError},
    VoiceId,
};

/// Text being typed for one voice, seeded with its current ratio.
pub struct RatioInput {
    id: VoiceId,
    text: String,
}

impl RatioInput {
    pub fn new(id: VoiceId, current: Ratio) -> Self {
        Self {
            id,
            text: current.to_string(),
        }
    }

    pub fn id(&self) -> VoiceId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Only digits and the fraction bar are accepted.
    pub fn push(&mut self, c: char) {
        if c.is_ascii_digit() || c == '/' {
            self.text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    /// The edit the typed text asks for.
    pub fn command(&self) -> Result<EnsembleCommand, RatioError> {
        let ratio: Ratio = self.text.parse()?;
        Ok(EnsembleCommand::EditRatio {
            id: self.id,
            numerator: ratio.numerator(),
            denominator: ratio.denominator(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> RatioInput {
        RatioInput::new(VoiceId::from_raw(4), Ratio::new(3, 2).unwrap())
    }

    #[test]
    fn starts_from_the_current_ratio() {
        assert_eq!(input().text(), "3/2");
    }

    #[test]
    fn typed_ratio_becomes_an_edit() {
        let mut input = input();
        for _ in 0..3 {
            input.backspace();
        }
        "14/8".chars().for_each(|c| input.push(c));
        assert_eq!(
            input.command(),
            Ok(EnsembleCommand::EditRatio {
                id: VoiceId::from_raw(4),
                numerator: 7,
                denominator: 4,
            })
        );
    }

    #[test]
    fn stray_keys_are_ignored() {
        let mut input = input();
        "x-.".chars().for_each(|c| input.push(c));
        assert_eq!(input.text(), "3/2");
    }

    #[test]
    fn zero_denominator_is_refused() {
        let mut input = input();
        input.backspace();
        input.push('0');
        assert_eq!(input.command(), Err(RatioError::ZeroDenominator));
    }
}
