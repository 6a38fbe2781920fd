//! Keyword tone analysis for Portuguese (and some English) messages.
//!
//! Shared by every module that reacts to the overall tone of a message,
//! so the word lists live in one place. A tone word directly preceded by a
//! negator counts for the opposite side ("não gosto" is negative).

const POSITIVE: &[&str] = &[
    "feliz", "alegre", "amo", "adoro", "gosto", "legal", "lindo", "linda", "obrigad", "parabéns",
    "bom", "boa", "ótimo", "maravilh", "happy", "love", "great", "thanks", "nice", "😊", "❤", "👍",
    "😍", "🥰",
];

const NEGATIVE: &[&str] = &[
    "triste", "chato", "odeio", "ruim", "péssimo", "raiva", "bravo", "brava", "medo", "chorar",
    "choro", "sad", "hate", "angry", "bad", "awful", "😢", "😡", "💔", "😭",
];

const AMPLIFIERS: &[&str] = &[
    "muito", "demais", "super", "extremamente", "tão", "very", "so much", "!", "?!",
];

const NEGATORS: &[&str] = &["não", "nao", "nem", "nunca", "not", "never"];

/// Overall tone of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
}

#[derive(Default)]
struct Tally {
    positive: f32,
    negative: f32,
}

impl Tally {
    fn count(&mut self, text: &str, words: &[&str], polarity: Polarity) {
        for word in words {
            let Some(at) = text.find(word) else {
                continue;
            };
            let flipped = preceded_by_negator(&text[..at]);
            match (polarity, flipped) {
                (Polarity::Positive, false) | (Polarity::Negative, true) => self.positive += 1.0,
                (Polarity::Negative, false) | (Polarity::Positive, true) => self.negative += 1.0,
            }
        }
    }
}

fn preceded_by_negator(before: &str) -> bool {
    before
        .split(|c: char| !c.is_alphanumeric())
        .rev()
        .find(|w| !w.is_empty())
        .is_some_and(|w| NEGATORS.contains(&w))
}

/// Tone of `text` as `(valence, intensity)`.
///
/// Expects lowercased input. `valence` is in `[-1, 1]`, `intensity` in
/// `[0.1, 1]`; text without tone words is `(0.0, 0.1)`.
pub fn analyze_sentiment(text: &str) -> (f32, f32) {
    let mut tally = Tally::default();
    tally.count(text, POSITIVE, Polarity::Positive);
    tally.count(text, NEGATIVE, Polarity::Negative);
    let amplified = AMPLIFIERS.iter().filter(|w| text.contains(*w)).count() as f32;

    let hits = tally.positive + tally.negative;
    let valence = (tally.positive - tally.negative) / (hits + 1.0);
    let intensity = ((hits + amplified) / 5.0).clamp(0.1, 1.0);
    (valence, intensity)
}

/// Magnitude of `polarity` in `text`, or `None` when the tone points the other way.
pub fn polarity_magnitude(text: &str, polarity: Polarity) -> Option<f32> {
    let (valence, _) = analyze_sentiment(text);
    let signed = match polarity {
        Polarity::Positive => valence,
        Polarity::Negative => -valence,
    };
    (signed > 0.0).then_some(signed.min(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_text() {
        assert_eq!(analyze_sentiment("a mesa está na sala"), (0.0, 0.1));
        assert_eq!(analyze_sentiment(""), (0.0, 0.1));
    }

    #[test]
    fn test_tone_direction() {
        assert!(analyze_sentiment("estou feliz, obrigado").0 > 0.0);
        assert!(analyze_sentiment("estou triste e com raiva").0 < 0.0);
        assert!(analyze_sentiment("😊👍").0 > 0.0);
    }

    #[test]
    fn test_negation_flips_tone() {
        assert!(analyze_sentiment("eu não gosto disso").0 < 0.0);
        assert!(analyze_sentiment("nunca triste").0 > 0.0);
        // negator must be the word right before
        assert!(analyze_sentiment("não sei, mas gosto").0 > 0.0);
    }

    #[test]
    fn test_amplifiers_raise_intensity() {
        let (_, plain) = analyze_sentiment("legal");
        let (_, amplified) = analyze_sentiment("muito legal demais!");
        assert!(amplified > plain);
    }

    #[test]
    fn test_polarity_magnitude() {
        assert!(polarity_magnitude("que dia feliz", Polarity::Positive).is_some());
        assert!(polarity_magnitude("que dia feliz", Polarity::Negative).is_none());
        assert!(polarity_magnitude("", Polarity::Positive).is_none());
    }
}
