//! Word and role tables used by more than one module.
//!
//! Keywords are matched as lowercase substrings, so short stems ("cansad")
//! cover both genders and plurals. Keep entries long enough not to hide
//! inside unrelated words.

use anima_core::RoleWeights;

/// Caregivers and close family. Anyone else still counts a little.
pub const CAREGIVERS: RoleWeights = RoleWeights::new(
    &[
        ("mamãe", 1.0),
        ("mãe", 1.0),
        ("papai", 1.0),
        ("pai", 1.0),
        ("vovó", 0.8),
        ("vovô", 0.8),
        ("avó", 0.8),
        ("avô", 0.8),
        ("tia", 0.6),
        ("tio", 0.6),
    ],
    0.3,
);

/// Everyone the persona knows by name.
pub const SOCIAL_CIRCLE: RoleWeights = RoleWeights::new(
    &[
        ("mamãe", 1.0),
        ("papai", 1.0),
        ("irmão", 0.8),
        ("irmã", 0.8),
        ("amigo", 0.7),
        ("amiga", 0.7),
        ("professor", 0.5),
        ("professora", 0.5),
    ],
    0.2,
);

/// Roles that make the persona wary. Unlisted roles are not strangers.
pub const STRANGERS: RoleWeights = RoleWeights::new(
    &[("estranho", 1.0), ("desconhecido", 1.0), ("visita", 0.5)],
    0.0,
);

pub const LOVE: &[&str] = &[
    "te amo", "amo você", "amo voce", "te adoro", "love you", "❤", "🥰", "😍",
];

pub const PRAISE: &[&str] = &[
    "muito bem", "parabéns", "parabens", "orgulho", "inteligente", "esperto", "esperta",
    "good job", "well done",
];

pub const SCOLDING: &[&str] = &[
    "não pode", "nao pode", "para com isso", "de castigo", "que vergonha", "stop it",
];

pub const FAREWELL: &[&str] = &[
    "tchau", "até logo", "até amanhã", "vou embora", "vou sair", "bye",
];

pub const TIRED: &[&str] = &[
    "cansad", "sono", "exaust", "quero dormir", "tired", "sleepy",
];

pub const PLAY: &[&str] = &[
    "brincar", "brincadeira", "jogo", "jogar", "esconde-esconde", "pega-pega", "play", "game",
];

pub const STORY: &[&str] = &[
    "história", "historia", "era uma vez", "dragão", "princesa", "castelo", "story",
];

/// Greetings at the start of a message.
pub const GREETING_PATTERN: &str =
    r"^\s*(oi+|olá|ola|bom dia|boa tarde|boa noite|hello|hi)\b";

/// Either a question mark or an interrogative word.
pub const QUESTION_PATTERN: &str =
    r"\?|\b(por que|porquê|como funciona|o que é|what|why|how)\b";

/// Doubled exclamation marks or cheering interjections.
pub const EXCITED_PATTERN: &str = r"!{2,}|\b(oba|eba|yay|uhu)\b";
