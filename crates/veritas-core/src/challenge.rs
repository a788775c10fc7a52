use rand::Rng;
use serde::Serialize;

/// The six challenge templates the host can pose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeKind {
    TwoTruths,
    QuickFire,
    Alibi,
    NeverHaveIEver,
    TallTale,
    HotSeat,
}

const ALL_KINDS: [ChallengeKind; 6] = [
    ChallengeKind::TwoTruths,
    ChallengeKind::QuickFire,
    ChallengeKind::Alibi,
    ChallengeKind::NeverHaveIEver,
    ChallengeKind::TallTale,
    ChallengeKind::HotSeat,
];

/// Yes/no questions for the quick-fire round.
const QUICK_FIRE_QUESTIONS: &[&str] = &[
    "Have you ever pretended to be sick to skip work or school?",
    "Have you ever read someone else's messages without permission?",
    "Have you ever taken credit for something you didn't do?",
    "Have you ever laughed at a joke you didn't understand?",
    "Have you ever regifted a present?",
    "Have you ever lied about your age?",
    "Have you ever blamed a pet for something you did?",
    "Have you ever secretly disliked a friend's cooking and said it was great?",
];

/// Interrogation-style alibi prompts.
const ALIBI_QUESTIONS: &[&str] = &[
    "Where were you last Friday at 9pm, and who can confirm it?",
    "Walk us through exactly what you ate for breakfast this morning.",
    "What did you do in the first hour after you woke up yesterday?",
    "Describe the last phone call you made, in detail.",
    "What was the last thing you bought, and where were you standing when you paid?",
    "Who was the last person you spoke to before walking in here?",
];

/// Statements for the never-have-I-ever round.
const NEVER_HAVE_I_EVER: &[&str] = &[
    "Never have I ever sung loudly in the car thinking no one could see me.",
    "Never have I ever sent a text to the wrong person and denied it.",
    "Never have I ever returned something after using it.",
    "Never have I ever forgotten someone's name mid-conversation.",
    "Never have I ever pretended to know a band to impress someone.",
    "Never have I ever stalked an ex on social media.",
    "Never have I ever eaten food that fell on the floor.",
];

/// One prompt the recording booth poses to the speaker. Immutable once
/// drawn; the `kind` field travels on the wire as `type`.
#[derive(Clone, Debug, Serialize)]
pub struct Challenge {
    #[serde(rename = "type")]
    pub kind: ChallengeKind,
    pub title: String,
    pub instruction: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
}

impl Challenge {
    /// Draw a challenge uniformly at random from the catalog. Kinds with a
    /// question list additionally draw one entry uniformly. Deterministic
    /// given a seeded `rng`.
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let kind = ALL_KINDS[rng.gen_range(0..ALL_KINDS.len())];
        Self::for_kind(kind, rng)
    }

    /// Convenience wrapper over [`Challenge::draw`] using the thread RNG.
    pub fn random() -> Self {
        Self::draw(&mut rand::thread_rng())
    }

    fn for_kind<R: Rng + ?Sized>(kind: ChallengeKind, rng: &mut R) -> Self {
        match kind {
            ChallengeKind::TwoTruths => Self {
                kind,
                title: "Two Truths and a Lie".into(),
                instruction: "Tell us three short things about yourself. Two must be true, \
                              one must be a lie. Don't say which is which."
                    .into(),
                question: None,
            },
            ChallengeKind::QuickFire => Self {
                kind,
                title: "Quick Fire".into(),
                instruction: "Answer the question out loud with a yes or a no, then keep \
                              talking about it for ten seconds."
                    .into(),
                question: Some(pick(rng, QUICK_FIRE_QUESTIONS).into()),
            },
            ChallengeKind::Alibi => Self {
                kind,
                title: "The Alibi".into(),
                instruction: "You're being questioned. Answer with as much detail as you can."
                    .into(),
                question: Some(pick(rng, ALIBI_QUESTIONS).into()),
            },
            ChallengeKind::NeverHaveIEver => Self {
                kind,
                title: "Never Have I Ever".into(),
                instruction: "React to the statement. Tell us whether you've done it, and \
                              the story behind it if there is one."
                    .into(),
                question: Some(pick(rng, NEVER_HAVE_I_EVER).into()),
            },
            ChallengeKind::TallTale => Self {
                kind,
                title: "Tall Tale".into(),
                instruction: "Tell a thirty-second story that is either completely true or \
                              completely made up."
                    .into(),
                question: None,
            },
            ChallengeKind::HotSeat => Self {
                kind,
                title: "The Hot Seat".into(),
                instruction: "Confess something trivial you've never told anyone — or make \
                              one up and sell it."
                    .into(),
                question: None,
            },
        }
    }

    /// One-line description handed to the prompt builder as context for
    /// what the speaker was responding to.
    pub fn prompt_context(&self) -> String {
        match &self.question {
            Some(q) => format!("{} — {}", self.title, q),
            None => format!("{} — {}", self.title, self.instruction),
        }
    }
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, list: &'a [&'a str]) -> &'a str {
    list[rng.gen_range(0..list.len())]
}
