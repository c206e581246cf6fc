use rand::seq::SliceRandom;

const THINKING_MESSAGES: &[&str] = &[
    "Sharpening pencils",
    "Consulting the syllabus",
    "Checking the working",
    "Drawing a number line",
    "Looking up the formula",
    "Marking the margins",
    "Balancing both sides",
    "Reading the question twice",
    "Finding the common denominator",
    "Showing the steps",
];

pub fn get_random_thinking_message() -> &'static str {
    THINKING_MESSAGES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("Thinking")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_comes_from_list() {
        let message = get_random_thinking_message();
        assert!(THINKING_MESSAGES.contains(&message));
    }
}
