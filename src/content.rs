//! Content assembly: topic + research text -> ordered slide texts.
//!
//! The outline is fixed. Four head slides (title, objectives, outline,
//! introduction) are followed by filler slides for loop indices
//! `4..slides - 4` and two tail slides (conclusions, recommendations).
//! With `slides >= 8` that yields `slides - 2` entries; below 8 the filler
//! range is empty and the sequence always has six entries.

use crate::utils::truncate_chars;

/// Subtitle shown on the title slide
pub const SUBTITLE: &str = "Comprehensive Seminar Presentation";

/// Characters of research text used for the introduction slide
const INTRODUCTION_CHARS: usize = 200;

/// Index of the first filler slide
pub const FIRST_FILLER_INDEX: i64 = 4;

/// Number of fixed slides (head + tail)
pub const FIXED_SLIDES: usize = 6;

/// Build the ordered slide texts for a seminar.
pub fn assemble_slides(topic: &str, research: &str, slides: i64) -> Vec<String> {
    let mut content = Vec::with_capacity(FIXED_SLIDES);

    content.push(format!("Title: {}\nSubtitle: {}", topic, SUBTITLE));
    content.push(format!(
        "Learning Objectives:\n- Understand the key concepts of {}\n- Analyze evidence and data\n- Discuss implications and recommendations",
        topic
    ));
    content.push(
        "Outline:\n1. Introduction\n2. Main Content\n3. Evidence\n4. Conclusions\n5. Recommendations"
            .to_string(),
    );
    content.push(format!(
        "Introduction:\n{}...",
        truncate_chars(research, INTRODUCTION_CHARS)
    ));

    for i in FIRST_FILLER_INDEX..slides.saturating_sub(4) {
        content.push(filler_slide(topic, i));
    }

    content.push(format!("Conclusions:\nKey findings on {}.", topic));
    content.push(format!("Recommendations:\nActionable steps for {}.", topic));

    content
}

/// Text of the filler slide at loop index `i`
pub fn filler_slide(topic: &str, i: i64) -> String {
    format!(
        "Slide {}: {} - Aspect {}\nContent based on research.",
        i,
        topic,
        i - 3
    )
}

/// Number of filler slides produced for a requested count
pub fn filler_count(slides: i64) -> usize {
    usize::try_from(slides.saturating_sub(4).saturating_sub(FIRST_FILLER_INDEX)).unwrap_or(0)
}
