// src/samples.rs
//! Labelled demo sentences, served at `/samples`.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SampleCategory {
    pub label: &'static str,
    pub texts: &'static [&'static str],
}

pub static SAMPLES: [SampleCategory; 4] = [
    SampleCategory {
        label: "positive",
        texts: &[
            "I absolutely love this amazing new restaurant! The food is incredible and the service is outstanding!",
            "What a fantastic day! Everything went perfectly and I'm so excited about the future! 🎉",
            "This movie is the best thing I've ever seen. Absolutely brilliant and touching!",
            "Super happy with my new purchase! Excellent quality and fast delivery. Highly recommend! 👍",
        ],
    },
    SampleCategory {
        label: "negative",
        texts: &[
            "This is the worst experience I've ever had. Terrible service and awful food. Never coming back!",
            "I hate this stupid software. It's buggy, slow, and completely useless. What a waste of money! 😡",
            "Disappointed and frustrated with this product. Poor quality and doesn't work as advertised.",
            "The movie was boring and predictable. Two hours of my life I'll never get back. Awful! 👎",
        ],
    },
    SampleCategory {
        label: "neutral",
        texts: &[
            "The library opens at 9 AM and closes at 6 PM on weekdays.",
            "Today's weather forecast shows partly cloudy skies with temperatures around 72°F.",
            "The meeting is scheduled for next Tuesday at 2:00 PM in conference room B.",
            "Please submit your report by the end of the week. Include all necessary documentation.",
        ],
    },
    SampleCategory {
        label: "mixed",
        texts: &[
            "The hotel room was nice and clean, but the service was terrible and the food was overpriced.",
            "Great product design and functionality, however the customer support is lacking and delivery was slow.",
            "I love the concept of this app, but it crashes frequently and has many bugs that need fixing.",
            "Beautiful location and amazing views! Too bad the weather was awful and it rained all day. 😕",
        ],
    },
];

/// Texts of one category, matched case-insensitively.
pub fn category(label: &str) -> Option<&'static [&'static str]> {
    SAMPLES
        .iter()
        .find(|c| c.label.eq_ignore_ascii_case(label))
        .map(|c| c.texts)
}
