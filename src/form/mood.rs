//! Mood slider bounds and the emoji shown next to the rating

pub const MOOD_MIN: i64 = 1;
pub const MOOD_MAX: i64 = 10;

const MOOD_EMOJI: [&str; 10] = [
    "\u{1F61E}", // 😞
    "\u{1F610}", // 😐
    "\u{1F600}", // 😀
    "\u{1F604}", // 😄
    "\u{1F601}", // 😁
    "\u{1F602}", // 😂
    "\u{1F603}", // 😃
    "\u{1F604}", // 😄
    "\u{1F605}", // 😅
    "\u{1F606}", // 😆
];

/// Emoji for a mood rating; `None` outside 1..=10
pub fn mood_emoji(mood: i64) -> Option<&'static str> {
    if (MOOD_MIN..=MOOD_MAX).contains(&mood) {
        Some(MOOD_EMOJI[(mood - MOOD_MIN) as usize])
    } else {
        None
    }
}

/// What the slider would settle on for `mood` (min 1, max 10, step 1)
pub fn clamp_to_slider(mood: i64) -> i64 {
    mood.clamp(MOOD_MIN, MOOD_MAX)
}
