//! Cat mood and advice derivation. Pure lookups, no state.

use chrono::{DateTime, Local, Timelike, Utc};

use crate::model::Condition;

/// An illustrative cat photo plus a one-line mood message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatMood {
    pub image_url: &'static str,
    pub message: &'static str,
}

const MOOD_CLEAR: CatMood = CatMood {
    image_url: "https://images.unsplash.com/photo-1573865526739-10659fec78a5?w=400",
    message: "Purr-fect day for sunbathing!",
};
const MOOD_CLOUDS: CatMood = CatMood {
    image_url: "https://images.unsplash.com/photo-1548247416-ec66f4900b2e?w=400",
    message: "Good day for a catnap!",
};
const MOOD_RAIN: CatMood = CatMood {
    image_url: "https://images.unsplash.com/photo-1511044568932-338cba0ad803?w=400",
    message: "Staying indoors today, it's too wet outside!",
};
const MOOD_SNOW: CatMood = CatMood {
    image_url: "https://images.unsplash.com/photo-1514888286974-6c03e2ca1dba?w=400",
    message: "Brrr! Time to curl up by the fireplace!",
};
const MOOD_THUNDERSTORM: CatMood = CatMood {
    image_url: "https://images.unsplash.com/photo-1519052537078-e6302a4968d4?w=400",
    message: "Hide! The thunder is too scary!",
};
const MOOD_MIST: CatMood = CatMood {
    image_url: "https://images.unsplash.com/photo-1495360010541-f48722b34f7d?w=400",
    message: "Such a mysterious and misty day!",
};
const MOOD_DEFAULT: CatMood = CatMood {
    image_url: "https://images.unsplash.com/photo-1533738363-b7f9aef128ce?w=400",
    message: "Just another purr-fect day!",
};

/// Mood entry for a condition.
pub fn mood_for(condition: Condition) -> CatMood {
    match condition {
        Condition::Rain => MOOD_RAIN,
        Condition::Snow => MOOD_SNOW,
        Condition::Clear => MOOD_CLEAR,
        Condition::Clouds => MOOD_CLOUDS,
        Condition::Thunderstorm => MOOD_THUNDERSTORM,
        Condition::Mist => MOOD_MIST,
        Condition::Other => MOOD_DEFAULT,
    }
}

/// Fallback when no advice entry exists for a combination.
pub const DEFAULT_ADVICE: &str =
    "Whatever the weather, it's always time for a cat nap! \u{1f63a}\u{1f4a4}";

/// Fallback for [`forecast_mood_for`].
pub const DEFAULT_FORECAST_MOOD: &str = "Just another purr-fect day! \u{1f63a}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TempBand {
    Hot,
    Cold,
    Normal,
}

impl TempBand {
    fn from_temp(temp_c: f64) -> Self {
        if temp_c > 25.0 {
            Self::Hot
        } else if temp_c < 10.0 {
            Self::Cold
        } else {
            Self::Normal
        }
    }
}

fn is_night(at: DateTime<Utc>) -> bool {
    let hour = at.with_timezone(&Local).hour();
    hour < 6 || hour > 20
}

/// Advice line keyed by condition, local day/night, and temperature band.
///
/// Night is a local hour before 06:00 or after 20:59. Temperatures above
/// 25 °C are hot, below 10 °C cold. Combinations without a table entry
/// resolve to [`DEFAULT_ADVICE`].
pub fn advice_for(condition: Condition, temp_c: f64, at: DateTime<Utc>) -> &'static str {
    use Condition::{Clear, Clouds, Rain};
    use TempBand::{Cold, Hot, Normal};

    let night = is_night(at);
    let band = TempBand::from_temp(temp_c);

    match (condition, night, band) {
        (Clear, false, Hot) => {
            "Find a cool spot in the shade, and don't forget to drink water! \u{1f431}\u{1f4a7}"
        }
        (Clear, false, Normal) => {
            "Perfect weather for a catnap in the sunbeam! \u{1f63a}\u{2600}\u{fe0f}"
        }
        (Clear, false, Cold) => {
            "Find that sunny windowsill and soak up the warmth! \u{1f638}\u{2728}"
        }
        (Clear, true, Hot) => "Night prowling weather! Keep hydrated! \u{1f431}\u{1f319}",
        (Clear, true, Normal) => "Purr-fect night for stargazing! \u{1f63a}\u{2b50}",
        (Clear, true, Cold) => "Time to snuggle under the blankets! \u{1f638}\u{1f6cf}\u{fe0f}",
        (Clouds, false, Hot) => {
            "Good day for a lazy indoor stretch! \u{1f431}\u{1f9d8}\u{200d}\u{2642}\u{fe0f}"
        }
        (Clouds, false, Normal) => "Ideal weather for window bird watching! \u{1f63a}\u{1f426}",
        (Clouds, false, Cold) => "Time to find a warm lap to sit on! \u{1f638}\u{1f49d}",
        (Clouds, true, Hot) => "Nice evening for roof adventures! \u{1f431}\u{1f3e0}",
        (Clouds, true, Normal) => {
            "Cozy night for indoor zoomies! \u{1f63a}\u{1f3c3}\u{200d}\u{2642}\u{fe0f}"
        }
        (Clouds, true, Cold) => "Cuddle up in your favorite blanket! \u{1f638}\u{1f6cb}\u{fe0f}",
        (Rain, false, Hot) => {
            "Watch the rain from your favorite windowsill! \u{1f431}\u{1f327}\u{fe0f}"
        }
        (Rain, false, Normal) => "Perfect day for indoor acrobatics! \u{1f63a}\u{1f3aa}",
        (Rain, false, Cold) => "Time for a warm radiator nap! \u{1f638}\u{1f525}",
        (Rain, true, Hot) => "Stay dry and watch the lightning show! \u{1f431}\u{26a1}",
        (Rain, true, Normal) => {
            "Cozy night for purring under covers! \u{1f63a}\u{1f6cf}\u{fe0f}"
        }
        (Rain, true, Cold) => "Extra snuggles required tonight! \u{1f638}\u{2764}\u{fe0f}",
        _ => DEFAULT_ADVICE,
    }
}

/// Short per-day mood line for forecast entries, keyed by condition and
/// temperature band only. Combinations without an entry resolve to
/// [`DEFAULT_FORECAST_MOOD`].
pub fn forecast_mood_for(condition: Condition, temp_c: f64) -> &'static str {
    use Condition::{Clear, Clouds, Rain, Snow};
    use TempBand::{Cold, Hot, Normal};

    match (condition, TempBand::from_temp(temp_c)) {
        (Clear, Hot) => "Lazy cat day, finding sunny spots for naps! \u{1f63a}\u{2600}\u{fe0f}",
        (Clear, Normal) => "Purr-fect day for sunbathing! \u{1f638}",
        (Clear, Cold) => "Seeking warm sunbeams! \u{1f431}\u{2728}",
        (Clouds, Hot) => "Comfy cloud watching day! \u{1f63a}\u{2601}\u{fe0f}",
        (Clouds, Normal) => "Cozy napping weather! \u{1f638}\u{1f4a4}",
        (Clouds, Cold) => "Time for blanket snuggles! \u{1f431}\u{1f325}\u{fe0f}",
        (Rain, Hot) => "Window watching the rain! \u{1f63a}\u{1f327}\u{fe0f}",
        (Rain, Normal) => "Indoor playtime weather! \u{1f638}\u{1f3ae}",
        (Rain, Cold) => "Purr-fect tea and cuddles weather! \u{1f431}\u{2614}",
        (Snow, Hot) => "Rare weather for a confused kitty! \u{1f63a}\u{2744}\u{fe0f}",
        (Snow, Normal) => "Watching snowflakes from inside! \u{1f638}\u{26c4}",
        (Snow, Cold) => "Time to curl up by the fireplace! \u{1f431}\u{1f525}",
        _ => DEFAULT_FORECAST_MOOD,
    }
}
