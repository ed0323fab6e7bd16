//! Property tests for delivery deduplication

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use proptest::prelude::*;

use herald::notifier::{DedupNotifier, Messenger};

#[derive(Debug, Default)]
struct RecordingMessenger {
    sent: Mutex<Vec<String>>,
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send(&self, text: &str) -> herald::Result<()> {
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

proptest! {
    // A small alphabet makes repeated runs of the same message likely
    #[test]
    fn no_adjacent_duplicate_deliveries(messages in proptest::collection::vec("[ab]{1,2}", 0..32)) {
        let recorder = Arc::new(RecordingMessenger::default());
        let mut notifier = DedupNotifier::new(Arc::clone(&recorder) as Arc<dyn Messenger>, "status");

        tokio_test::block_on(async {
            for message in &messages {
                notifier.notify(message).await.unwrap();
            }
        });

        let sent = recorder.sent.lock().unwrap();
        for pair in sent.windows(2) {
            prop_assert_ne!(&pair[0], &pair[1]);
        }
    }

    #[test]
    fn every_value_change_is_delivered(messages in proptest::collection::vec("[ab]{1,2}", 0..32)) {
        let recorder = Arc::new(RecordingMessenger::default());
        let mut notifier = DedupNotifier::new(Arc::clone(&recorder) as Arc<dyn Messenger>, "status");

        tokio_test::block_on(async {
            for message in &messages {
                notifier.notify(message).await.unwrap();
            }
        });

        // Collapsing consecutive repeats of the input must give exactly the
        // delivered sequence.
        let mut collapsed: Vec<String> = Vec::new();
        for message in &messages {
            if collapsed.last() != Some(message) {
                collapsed.push(message.clone());
            }
        }

        let sent = recorder.sent.lock().unwrap();
        prop_assert_eq!(&*sent, &collapsed);
    }
}
