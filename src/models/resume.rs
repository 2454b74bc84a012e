use std::sync::LazyLock;

/// A showcased project, in display order within [`ResumeData::projects`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub stack: &'static [&'static str],
    pub link: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skills {
    pub frontend: &'static [&'static str],
    pub backend: &'static [&'static str],
    pub architecture: &'static [&'static str],
}

/// Resume content compiled into the binary.
///
/// Built once on first access and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeData {
    pub name: &'static str,
    pub title: &'static str,
    pub location: &'static str,
    /// Headline technologies shown next to the identity block
    pub stack: &'static [&'static str],
    pub projects: Vec<Project>,
    pub skills: Skills,
}

static RESUME: LazyLock<ResumeData> = LazyLock::new(|| ResumeData {
    name: "Mohamed Mahir",
    title: "Senior Fullstack Architect",
    location: "Casablanca (Open to Global Remote)",
    stack: &["Vue 3", "Nuxt", "Node.js", "PostgreSQL", "AWS"],
    projects: vec![
        Project {
            title: "Kamera Express",
            description: "Algolia-powered search, +10% PageSpeed.",
            stack: &["Vue 2", "Nuxt", "Algolia"],
            link: "https://kamera-express.nl",
        },
        Project {
            title: "Carrefour France",
            description: "Rebuilt checkout flow, Multi-store platform.",
            stack: &["Vue 3 Migration", "DDD", "GTM"],
            link: "https://carrefour.fr",
        },
        Project {
            title: "CouponAI (HighCo)",
            description: "Fullstack Coupon Platform, RBAC.",
            stack: &["NestJS", "React", "Microservices"],
            link: "https://highco.com",
        },
        Project {
            title: "UGAP",
            description: "Public Procurement Platform, A11y Standards.",
            stack: &["Vue 2", "Nuxt", "Micro-frontends"],
            link: "https://ugap.fr",
        },
        Project {
            title: "JP&CO",
            description: "IoT GPS Tracking System.",
            stack: &["Vue 2", "Laravel", "Google Maps API"],
            link: "https://jptrack.jp.co.ma",
        },
        Project {
            title: "Win by Inwi",
            description: "100% Digital Telecom Operator.",
            stack: &["Vue Storefront", "Elasticsearch", "Magento"],
            link: "https://inwi.ma",
        },
    ],
    skills: Skills {
        frontend: &[
            "Vue 2/3",
            "Nuxt 2/3",
            "React",
            "Tailwind",
            "Scss",
            "BEM",
            "Storybook",
        ],
        backend: &[
            "Node.js",
            "NestJS",
            "Laravel",
            "PostgreSQL",
            "AWS",
            "Cloudflare",
        ],
        architecture: &["TDD", "DDD", "Clean Arch", "Docker", "CI/CD", "Monorepos"],
    },
});

/// Access the resume content.
///
/// Every call returns the same instance.
pub fn resume_data() -> &'static ResumeData {
    &RESUME
}
