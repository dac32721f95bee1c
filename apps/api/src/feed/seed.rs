//! Static seed data for the simulated feed.

use crate::models::job::{Job, JobSource};
use crate::models::profile::UserProfile;

pub const INITIAL_BLOCKED_KEYWORDS: [&str; 3] = ["unpaid", "commission only", "volunteer"];

struct SeedJob {
    id: &'static str,
    title: &'static str,
    company: &'static str,
    location: &'static str,
    description: &'static str,
    posted_date: &'static str,
    is_expired: bool,
    source: JobSource,
    logo_url: &'static str,
    keywords: &'static [&'static str],
}

const SEED_JOBS: &[SeedJob] = &[
    SeedJob {
        id: "1",
        title: "Senior Frontend Engineer",
        company: "TechFlow Systems",
        location: "San Francisco, CA (Remote)",
        description: "We are looking for a Senior React Engineer with strong TypeScript skills to lead our dashboard team. Experience with Gemini API is a plus.",
        posted_date: "2 hours ago",
        is_expired: false,
        source: JobSource::Native,
        logo_url: "https://picsum.photos/id/1/48/48",
        keywords: &["React", "TypeScript", "Redux"],
    },
    SeedJob {
        id: "2",
        title: "Marketing Specialist - Commission Based",
        company: "GrowthHackerz",
        location: "New York, NY",
        description: "Join our aggressive sales team. This is a commission-only role with unlimited upside. Cold calling required.",
        posted_date: "1 week ago",
        is_expired: false,
        source: JobSource::ThirdParty,
        logo_url: "https://picsum.photos/id/2/48/48",
        keywords: &["Sales", "Commission", "Marketing"],
    },
    SeedJob {
        id: "3",
        title: "React Native Developer",
        company: "MobileFirst Inc",
        location: "Austin, TX",
        description: "Building the next generation mobile app. Must know React Native and iOS bridges.",
        posted_date: "3 weeks ago",
        is_expired: true,
        source: JobSource::Native,
        logo_url: "https://picsum.photos/id/3/48/48",
        keywords: &["React Native", "iOS", "Android"],
    },
    SeedJob {
        id: "4",
        title: "Full Stack Developer",
        company: "Startup A",
        location: "Remote",
        description: "Looking for a rockstar ninja to work for equity only until we get funding.",
        posted_date: "1 day ago",
        is_expired: false,
        source: JobSource::ThirdParty,
        logo_url: "https://picsum.photos/id/4/48/48",
        keywords: &["Full Stack", "Equity", "Unpaid"],
    },
    SeedJob {
        id: "5",
        title: "Lead UI/UX Designer",
        company: "Creative Studio",
        location: "London, UK",
        description: "Design beautiful interfaces for web applications. Proficiency in Figma and Tailwind CSS required.",
        posted_date: "5 hours ago",
        is_expired: false,
        source: JobSource::Native,
        logo_url: "https://picsum.photos/id/5/48/48",
        keywords: &["Figma", "UI/UX", "Tailwind"],
    },
];

/// Fresh copies of the seed listings, none annotated.
pub fn seed_jobs() -> Vec<Job> {
    SEED_JOBS
        .iter()
        .map(|s| Job {
            id: s.id.to_string(),
            title: s.title.to_string(),
            company: s.company.to_string(),
            location: s.location.to_string(),
            description: s.description.to_string(),
            posted_date: s.posted_date.to_string(),
            is_expired: s.is_expired,
            source: s.source,
            logo_url: s.logo_url.to_string(),
            keywords: s.keywords.iter().map(|k| k.to_string()).collect(),
            annotation: None,
        })
        .collect()
}

pub fn demo_profile() -> UserProfile {
    UserProfile {
        name: "Alex Dev".to_string(),
        headline: "Senior Frontend Engineer | React | TypeScript".to_string(),
        skills: [
            "React",
            "TypeScript",
            "Tailwind CSS",
            "Node.js",
            "GraphQL",
            "UI/UX",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
        experience_level: "Senior".to_string(),
    }
}
