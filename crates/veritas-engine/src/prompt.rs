use veritas_core::types::AnalysisMode;

/// Section markers the analysis model is told to emit and the parser
/// matches verbatim. Changing one side without the other breaks standard
/// mode parsing.
pub const BREAKDOWN_MARKER: &str = "🎯 THE BREAKDOWN:";
pub const SIGNALS_MARKER: &str = "🔍 SUSPICIOUS SIGNALS:";
pub const EXPLANATION_MARKER: &str = "💡 THE VERDICT EXPLAINED:";

/// Build the user prompt for the analysis model.
///
/// Pure — unit-testable without network access. Pace is computed against
/// `max(duration_seconds, 1)` so a zero or missing duration never divides
/// by zero.
pub fn build_prompt(
    transcript: &str,
    duration_seconds: f64,
    mode: AnalysisMode,
    challenge_prompt: Option<&str>,
) -> String {
    let word_count = transcript.split_whitespace().count();
    let pace = word_count as f64 / duration_seconds.max(1.0);

    let mut prompt = match mode {
        AnalysisMode::Party => format!(
            "The contestant spoke for {duration_seconds:.1} seconds \
             ({word_count} words, {pace:.1} words/sec).\n\
             Transcript: \"{transcript}\"\n\n\
             Score the performance. Respond with ONLY a JSON object — no markdown, \
             no code fences, no text outside the object — with exactly these keys:\n\
             {{\"verdict\": \"TRUTH\" or \"DECEPTION\", \
             \"confidence\": <integer between 50 and 99>, \
             \"scores\": {{\"deception\": <0.0-10.0>, \"conviction\": <0.0-10.0>, \
             \"creativity\": <0.0-10.0>, \"detail\": <0.0-10.0>, \
             \"entertainment\": <0.0-10.0>}}, \
             \"totalScore\": <sum of the five scores>, \
             \"breakdown\": \"<what stood out in their delivery>\", \
             \"signals\": \"<the tells you spotted>\", \
             \"judgment\": \"<your dramatic ruling>\", \
             \"tip\": \"<one tip to lie better next time>\"}}\n\
             Every score must carry decimal precision — 7.3, never 7."
        ),
        AnalysisMode::Standard => format!(
            "The speaker talked for {duration_seconds:.1} seconds \
             ({word_count} words, {pace:.1} words/sec).\n\
             Transcript: \"{transcript}\"\n\n\
             Deliver your verdict in exactly this layout:\n\
             VERDICT: TRUTH or DECEPTION\n\
             CONFIDENCE: <number between 0 and 100>%\n\
             {BREAKDOWN_MARKER}\n<your read on what they said>\n\
             {SIGNALS_MARKER}\n<the specific tells you spotted>\n\
             {EXPLANATION_MARKER}\n<your dramatic closing judgment>"
        ),
    };

    if let Some(challenge) = challenge_prompt {
        prompt.push_str(&format!(
            "\n\nContext: the speaker was responding to this challenge: \"{challenge}\""
        ));
    }

    prompt
}
