//! The category taxonomy: names and keyword signals as static data.
//!
//! Declaration order matters: classification ties break toward the
//! first-declared category.

/// One category with its keyword signals.
#[derive(Debug, Clone, Copy)]
pub struct Category {
    /// Category name; the trailing word selects the coarse type mapping.
    pub name: &'static str,
    /// Lowercase keyword signals. Multi-word entries match as substrings.
    pub keywords: &'static [&'static str],
}

/// The full taxonomy, in declaration (tie-break) order.
pub const CATEGORIES: &[Category] = &[
    Category {
        name: "Game Publisher",
        keywords: &[
            "games",
            "gaming",
            "entertainment",
            "studios",
            "interactive",
            "digital entertainment",
            "game",
            "publisher",
            "publishing",
            "media",
            "activision",
            "electronic arts",
            "ubisoft",
        ],
    },
    Category {
        name: "Book Publisher",
        keywords: &[
            "books",
            "publishing",
            "publications",
            "press",
            "editorial",
            "penguin",
            "harper",
            "macmillan",
            "scholastic",
            "textbook",
            "academic press",
        ],
    },
    Category {
        name: "Software Publisher",
        keywords: &[
            "software",
            "applications",
            "apps",
            "programs",
            "development",
            "dev",
            "solutions",
            "microsoft",
            "adobe",
            "autodesk",
            "oracle",
        ],
    },
    Category {
        name: "Media Publisher",
        keywords: &[
            "media",
            "news",
            "magazine",
            "newspaper",
            "broadcast",
            "streaming",
            "content",
            "netflix",
            "disney",
            "warner",
            "paramount",
        ],
    },
    Category {
        name: "Computer Hardware",
        keywords: &[
            "computers",
            "pc",
            "laptop",
            "desktop",
            "workstation",
            "server",
            "dell",
            "hp",
            "lenovo",
            "asus",
            "acer",
            "apple computer",
        ],
    },
    Category {
        name: "Components Provider",
        keywords: &[
            "components",
            "parts",
            "processors",
            "cpu",
            "gpu",
            "memory",
            "storage",
            "motherboard",
            "intel",
            "amd",
            "nvidia",
            "corsair",
            "kingston",
            "seagate",
            "western digital",
        ],
    },
    Category {
        name: "Network Hardware",
        keywords: &[
            "network",
            "networking",
            "router",
            "switch",
            "firewall",
            "wireless",
            "wifi",
            "cisco",
            "netgear",
            "tp-link",
            "ubiquiti",
            "juniper",
        ],
    },
    Category {
        name: "Mobile Hardware",
        keywords: &[
            "mobile",
            "smartphone",
            "tablet",
            "phone",
            "cellular",
            "samsung",
            "apple iphone",
            "huawei",
            "xiaomi",
            "oneplus",
        ],
    },
    Category {
        name: "Cloud Services",
        keywords: &[
            "cloud",
            "hosting",
            "datacenter",
            "infrastructure",
            "saas",
            "paas",
            "iaas",
            "amazon aws",
            "google cloud",
            "microsoft azure",
            "digitalocean",
        ],
    },
    Category {
        name: "IT Services",
        keywords: &[
            "consulting",
            "services",
            "integration",
            "support",
            "managed services",
            "ibm services",
            "accenture",
            "capgemini",
            "tcs",
        ],
    },
    Category {
        name: "Security Provider",
        keywords: &[
            "security",
            "cybersecurity",
            "antivirus",
            "firewall",
            "encryption",
            "norton",
            "mcafee",
            "symantec",
            "kaspersky",
            "palo alto",
        ],
    },
];
