//! Villager dialogue tables.
//!
//! Three pools: friendship tier by personality (three lines each), time of
//! day (three generic lines each), and weather by personality (one line
//! each).

use homestead_types::{FriendshipTier, Personality, TimeBucket, Weather};

/// Lines flavored by friendship band and personality.
pub const fn friendship_pool(tier: FriendshipTier, personality: Personality) -> &'static [&'static str] {
    match (tier, personality) {
        (FriendshipTier::Stranger, Personality::Cheerful) => &[
            "Oh, hello! You must be the new farmer. Welcome!",
            "Nice to meet you! The valley is lovely, isn't it?",
            "Hi there! If you need anything, just ask around.",
        ],
        (FriendshipTier::Stranger, Personality::Grumpy) => &[
            "Hmph. Another newcomer.",
            "What do you want?",
            "Don't trample the flowerbeds.",
        ],
        (FriendshipTier::Stranger, Personality::Shy) => &[
            "Oh! Um... hello.",
            "S-sorry, I didn't see you there.",
            "...Hi.",
        ],
        (FriendshipTier::Stranger, Personality::Energetic) => &[
            "Hey! New face! Want to race to the bridge?",
            "Whoa, you're the farmer? That's awesome!",
            "Hi hi hi! I'm always running around, you'll see me a lot!",
        ],
        (FriendshipTier::Stranger, Personality::Lazy) => &[
            "*yawn* Oh, hey.",
            "Mm. Hello. Nice day for a nap.",
            "You're new? Cool. Don't make me walk anywhere.",
        ],
        (FriendshipTier::Acquaintance, Personality::Cheerful) => &[
            "Good to see you again! How's the farm?",
            "You're settling in so well!",
            "I saw your crops on my walk. They look great!",
        ],
        (FriendshipTier::Acquaintance, Personality::Grumpy) => &[
            "You again. Well, at least you're polite.",
            "The farm's looking less of a mess. I suppose.",
            "Hmph. Fine weather, if you like that sort of thing.",
        ],
        (FriendshipTier::Acquaintance, Personality::Shy) => &[
            "Oh, it's you. Hi.",
            "I... I like your hat.",
            "Have you been to the library? It's quiet there.",
        ],
        (FriendshipTier::Acquaintance, Personality::Energetic) => &[
            "There you are! I've been jogging all morning!",
            "Did you know the river's full of fish right now?",
            "Let's do something fun later!",
        ],
        (FriendshipTier::Acquaintance, Personality::Lazy) => &[
            "Oh, you. Hey. Sit down a while.",
            "Farming sounds like so much work.",
            "I found a great shady spot. Don't tell anyone.",
        ],
        (FriendshipTier::Friend, Personality::Cheerful) => &[
            "My favorite farmer! You always brighten my day.",
            "I baked too many muffins again. Want one?",
            "Let's have a picnic when the weather's nice!",
        ],
        (FriendshipTier::Friend, Personality::Grumpy) => &[
            "Oh, it's you. Good. I mean... hello.",
            "You're alright, you know that?",
            "I saved you a seat at the tavern. Don't make it weird.",
        ],
        (FriendshipTier::Friend, Personality::Shy) => &[
            "I'm always happy when you stop by.",
            "I wrote a poem... maybe I'll show you someday.",
            "It's easier to talk to you than most people.",
        ],
        (FriendshipTier::Friend, Personality::Energetic) => &[
            "Best buddy! Race you to the pond!",
            "I told everyone how great your farm is!",
            "We should go exploring in the caves together!",
        ],
        (FriendshipTier::Friend, Personality::Lazy) => &[
            "Hey, friend. I'd get up, but... you know.",
            "You're one of the few people worth staying awake for.",
            "Want to watch the clouds? It's basically a hobby.",
        ],
        (FriendshipTier::BestFriend, Personality::Cheerful) => &[
            "I can't imagine this valley without you!",
            "You're family to me, you know that?",
            "Every day's better when I see you!",
        ],
        (FriendshipTier::BestFriend, Personality::Grumpy) => &[
            "Don't tell anyone, but you're my favorite person here.",
            "I'd fix your fence for free. Just this once. Every time.",
            "Took you long enough to visit. I missed you.",
        ],
        (FriendshipTier::BestFriend, Personality::Shy) => &[
            "I finished that poem. It's about you.",
            "You make me feel brave.",
            "I'm so glad you moved here.",
        ],
        (FriendshipTier::BestFriend, Personality::Energetic) => &[
            "Partner in adventure! What are we doing today?",
            "I'd run across the whole valley for you!",
            "You're the most fun person in the entire world!",
        ],
        (FriendshipTier::BestFriend, Personality::Lazy) => &[
            "For you, I'd even get up early. Maybe.",
            "You're the best. I mean it, even half asleep.",
            "Stay a while. Everything's better with you around.",
        ],
    }
}

/// Generic lines for a time-of-day bucket.
pub const fn time_pool(bucket: TimeBucket) -> &'static [&'static str] {
    match bucket {
        TimeBucket::Morning => &[
            "Good morning! The dew's still on the grass.",
            "Early start today?",
            "Nothing beats a fresh morning breeze.",
        ],
        TimeBucket::Afternoon => &[
            "Good afternoon! Busy day?",
            "The sun's high. Don't forget to drink water.",
            "Afternoons are made for market errands.",
        ],
        TimeBucket::Evening => &[
            "Good evening. The sunset's beautiful tonight.",
            "Heading home soon?",
            "Dinner smells are drifting from the tavern.",
        ],
        TimeBucket::Night => &[
            "You're out late. Be careful on the roads.",
            "The stars are so clear tonight.",
            "I should be asleep by now...",
        ],
    }
}

/// Lines reacting to the weather, one per personality.
pub const fn weather_pool(weather: Weather, personality: Personality) -> &'static [&'static str] {
    match (weather, personality) {
        (Weather::Sunny, Personality::Cheerful) => &["What a gorgeous sunny day!"],
        (Weather::Sunny, Personality::Grumpy) => &["Too bright. Where's my hat."],
        (Weather::Sunny, Personality::Shy) => &["The sunshine feels nice... warm."],
        (Weather::Sunny, Personality::Energetic) => &["Sunny day! Perfect for running laps!"],
        (Weather::Sunny, Personality::Lazy) => &["Perfect weather for a nap in the sun."],
        (Weather::Cloudy, Personality::Cheerful) => &["A few clouds never hurt anyone!"],
        (Weather::Cloudy, Personality::Grumpy) => &["Grey skies. Suits me fine."],
        (Weather::Cloudy, Personality::Shy) => &["I like cloudy days. They're calm."],
        (Weather::Cloudy, Personality::Energetic) => &["Clouds mean cooler running weather!"],
        (Weather::Cloudy, Personality::Lazy) => &["Cloudy... good excuse to stay in."],
        (Weather::Rainy, Personality::Cheerful) => &["Rain means happy crops!"],
        (Weather::Rainy, Personality::Grumpy) => &["Rain again. My knees ache."],
        (Weather::Rainy, Personality::Shy) => &["I like listening to the rain."],
        (Weather::Rainy, Personality::Energetic) => &["Puddle jumping time!"],
        (Weather::Rainy, Personality::Lazy) => &["Rainy days are for sleeping in."],
        (Weather::Stormy, Personality::Cheerful) => &["Quite the storm! Stay safe out there."],
        (Weather::Stormy, Personality::Grumpy) => &["Storm's coming. Batten down everything."],
        (Weather::Stormy, Personality::Shy) => &["The thunder scares me a little."],
        (Weather::Stormy, Personality::Energetic) => &["Did you see that lightning?! Wild!"],
        (Weather::Stormy, Personality::Lazy) => &["Storms are loud. I'm going back to bed."],
        (Weather::Snowy, Personality::Cheerful) => &["Snow! Let's build a snowman!"],
        (Weather::Snowy, Personality::Grumpy) => &["Snow. Cold. Shoveling. Wonderful."],
        (Weather::Snowy, Personality::Shy) => &["Snow makes everything so quiet."],
        (Weather::Snowy, Personality::Energetic) => &["Snowball fight! You're going down!"],
        (Weather::Snowy, Personality::Lazy) => &["Too cold. Wake me in spring."],
    }
}
