//! Static catalog of support resources.
//!
//! Crisis lines, self-care ideas, organizations and the signs that it is
//! time to reach out to a professional. Read-only, built once.

use once_cell::sync::Lazy;

/// A crisis support line
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrisisLine {
    pub name: &'static str,
    /// Number to call or instructions to text
    pub contact: &'static str,
    pub description: &'static str,
}

/// A mental health organization
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Organization {
    pub title: &'static str,
    pub description: &'static str,
    pub url: &'static str,
}

/// Everything shown on the resources view
#[derive(Clone, Debug)]
pub struct ResourceCatalog {
    pub crisis_lines: Vec<CrisisLine>,
    pub self_care: Vec<&'static str>,
    pub organizations: Vec<Organization>,
    pub warning_signs: Vec<&'static str>,
}

static RESOURCE_CATALOG: Lazy<ResourceCatalog> = Lazy::new(build_resource_catalog);

/// Get a reference to the cached resource catalog
pub fn resource_catalog() -> &'static ResourceCatalog {
    &RESOURCE_CATALOG
}

fn build_resource_catalog() -> ResourceCatalog {
    ResourceCatalog {
        crisis_lines: vec![
            CrisisLine {
                name: "988 Suicide & Crisis Lifeline",
                contact: "988",
                description: "24/7 free and confidential support",
            },
            CrisisLine {
                name: "Crisis Text Line",
                contact: "Text HOME to 741741",
                description: "Free 24/7 text support",
            },
            CrisisLine {
                name: "SAMHSA National Helpline",
                contact: "1-800-662-4357",
                description: "Mental health & substance abuse referrals",
            },
        ],
        self_care: vec![
            "Take a short walk outside",
            "Listen to calming music",
            "Practice deep breathing",
            "Connect with a friend or loved one",
            "Engage in a hobby you enjoy",
            "Get adequate sleep",
            "Drink water and eat nutritious food",
            "Limit social media time",
            "Write down your thoughts",
            "Practice gratitude",
        ],
        organizations: vec![
            Organization {
                title: "National Alliance on Mental Illness (NAMI)",
                description: "Education, support, and advocacy",
                url: "nami.org",
            },
            Organization {
                title: "Mental Health America",
                description: "Screening tools and resources",
                url: "mhanational.org",
            },
            Organization {
                title: "Psychology Today",
                description: "Find a therapist directory",
                url: "psychologytoday.com",
            },
        ],
        warning_signs: vec![
            "Persistent feelings of sadness, anxiety, or emptiness",
            "Loss of interest in activities you once enjoyed",
            "Significant changes in sleep or appetite",
            "Difficulty functioning in daily life",
            "Thoughts of self-harm or suicide",
        ],
    }
}
