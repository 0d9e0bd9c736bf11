//! Upstream intent classification seam
//!
//! Classification itself lives outside the engine; the session only needs
//! something that maps raw text to a `CommandIntent`.

use raidchat_core::CommandIntent;

pub trait IntentClassifier {
    fn classify(&self, text: &str) -> CommandIntent;
}

impl<F> IntentClassifier for F
where
    F: Fn(&str) -> CommandIntent,
{
    fn classify(&self, text: &str) -> CommandIntent {
        self(text)
    }
}
