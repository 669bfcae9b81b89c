use std::collections::HashMap;

use once_cell::sync::Lazy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CancellationGuide {
    pub method: &'static str,
    pub difficulty: Difficulty,
    pub instructions: &'static str,
    pub phone: Option<&'static str>,
    pub url: Option<&'static str>,
}

static FALLBACK_GUIDE: CancellationGuide = CancellationGuide {
    method: "Check account settings",
    difficulty: Difficulty::Medium,
    instructions: "Log in to the service, open account or billing settings and look \
                   for a cancel or manage subscription option.",
    phone: None,
    url: None,
};

static GUIDES: Lazy<HashMap<&'static str, CancellationGuide>> = Lazy::new(|| {
    HashMap::from([
        (
            "netflix",
            CancellationGuide {
                method: "Online",
                difficulty: Difficulty::Easy,
                instructions: "Go to Account > Membership and select Cancel Membership. \
                               Access continues until the end of the billing period.",
                phone: None,
                url: Some("https://www.netflix.com/cancelplan"),
            },
        ),
        (
            "spotify",
            CancellationGuide {
                method: "Online",
                difficulty: Difficulty::Easy,
                instructions: "Open your account page, choose Manage Plan and select \
                               Cancel Premium. The plan drops to free at period end.",
                phone: None,
                url: Some("https://www.spotify.com/account/subscription/"),
            },
        ),
        (
            "amazon prime",
            CancellationGuide {
                method: "Online",
                difficulty: Difficulty::Medium,
                instructions: "Go to Manage Prime Membership and select End Membership. \
                               Amazon shows several retention offers before confirming.",
                phone: None,
                url: Some("https://www.amazon.com/mc"),
            },
        ),
        (
            "hulu",
            CancellationGuide {
                method: "Online",
                difficulty: Difficulty::Easy,
                instructions: "Open Account > Cancel under Your Subscription. Bundled \
                               Disney+ plans must be cancelled through Disney instead.",
                phone: None,
                url: Some("https://secure.hulu.com/account"),
            },
        ),
        (
            "disney+",
            CancellationGuide {
                method: "Online",
                difficulty: Difficulty::Easy,
                instructions: "Under Subscription in account settings choose Cancel \
                               Subscription and confirm on the following screen.",
                phone: None,
                url: Some("https://www.disneyplus.com/account"),
            },
        ),
        (
            "max",
            CancellationGuide {
                method: "Online",
                difficulty: Difficulty::Medium,
                instructions: "Cancellation depends on where you signed up: direct \
                               subscriptions cancel under Subscription in settings, app-store \
                               ones through the store that bills you.",
                phone: None,
                url: Some("https://www.max.com/account"),
            },
        ),
        (
            "youtube premium",
            CancellationGuide {
                method: "Online",
                difficulty: Difficulty::Easy,
                instructions: "Open youtube.com/paid_memberships, select Manage \
                               Membership and then Deactivate.",
                phone: None,
                url: Some("https://www.youtube.com/paid_memberships"),
            },
        ),
        (
            "apple tv+",
            CancellationGuide {
                method: "In app",
                difficulty: Difficulty::Easy,
                instructions: "On an Apple device open Settings > Apple ID > \
                               Subscriptions, pick the subscription and tap Cancel.",
                phone: None,
                url: Some("https://support.apple.com/billing"),
            },
        ),
        (
            "adobe creative cloud",
            CancellationGuide {
                method: "Online or chat",
                difficulty: Difficulty::Hard,
                instructions: "Cancel under Plans in your Adobe account. Annual plans \
                               billed monthly charge an early-termination fee after the first \
                               14 days; chat support can sometimes waive it.",
                phone: None,
                url: Some("https://account.adobe.com/plans"),
            },
        ),
        (
            "planet fitness",
            CancellationGuide {
                method: "In person or mail",
                difficulty: Difficulty::Hard,
                instructions: "Visit your home club and fill out a cancellation form, or \
                               send a certified letter to the club. Online cancellation is not \
                               offered in most states.",
                phone: Some("1-844-880-7180"),
                url: None,
            },
        ),
        (
            "siriusxm",
            CancellationGuide {
                method: "Phone or chat",
                difficulty: Difficulty::Hard,
                instructions: "Call or use live chat and decline the retention offers; \
                               online self-service only pauses the plan.",
                phone: Some("1-866-635-2349"),
                url: None,
            },
        ),
        (
            "new york times",
            CancellationGuide {
                method: "Chat or phone",
                difficulty: Difficulty::Medium,
                instructions: "Digital subscriptions cancel via chat on the account page \
                               or by phone during business hours.",
                phone: Some("1-800-698-4637"),
                url: Some("https://www.nytimes.com/account"),
            },
        ),
        (
            "audible",
            CancellationGuide {
                method: "Online",
                difficulty: Difficulty::Medium,
                instructions: "From Account Details choose Cancel membership; unused \
                               credits are forfeited unless you pause instead.",
                phone: None,
                url: Some("https://www.audible.com/account/overview"),
            },
        ),
        (
            "icloud+",
            CancellationGuide {
                method: "In app",
                difficulty: Difficulty::Easy,
                instructions: "Open Settings > Apple ID > iCloud > Manage Storage and \
                               downgrade to the free tier.",
                phone: None,
                url: Some("https://support.apple.com/billing"),
            },
        ),
        (
            "dropbox",
            CancellationGuide {
                method: "Online",
                difficulty: Difficulty::Easy,
                instructions: "Under Settings > Plan select Cancel plan; storage drops \
                               to the free quota at the end of the billing cycle.",
                phone: None,
                url: Some("https://www.dropbox.com/account/plan"),
            },
        ),
    ])
});

/// Total lookup: unknown services get the generic fallback entry.
pub fn guide_for(service_name: &str) -> &'static CancellationGuide {
    let key = service_name.trim().to_lowercase();
    GUIDES.get(key.as_str()).unwrap_or(&FALLBACK_GUIDE)
}
