use std::rc::Rc;

use crate::portfolio::catalog::{Catalog, Project};

pub const COMPANY_NAME: &str = "OITS Dhaka";
pub const TAGLINE: &str = "Empowering Businesses Through Advanced Engineering";
pub const CONTACT_EMAIL: &str = "info@oitsdhaka.com";
pub const CONTACT_PHONE: &str = "+880 1234 567890";
pub const ADDRESS: &str = "House # 42, Road # 2/A, Block # Z, Dhaka 1209, Bangladesh";

pub struct Service {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub features: &'static [&'static str],
}

pub const SERVICES: &[Service] = &[
    Service {
        id: "web-dev",
        title: "Enterprise Web Solutions",
        description: "Scalable, high-performance web applications for complex business logic and high-traffic environments.",
        icon: "fa-globe",
        features: &["React & Next.js", "SaaS Multitenancy", "E-commerce Engine", "Headless CMS Integration"],
    },
    Service {
        id: "mobile-dev",
        title: "Native Mobile Apps",
        description: "iOS and Android experiences that use native hardware capabilities for maximum performance.",
        icon: "fa-mobile-screen",
        features: &["Swift & Kotlin", "React Native", "Flutter", "Mobile-First Security"],
    },
    Service {
        id: "dedicated-teams",
        title: "Dedicated Teams",
        description: "Engineering teams integrated directly into your workflow to accelerate delivery.",
        icon: "fa-users",
        features: &["Staff Augmentation", "Agile Governance", "Full-stack Engineering", "Cross-functional Support"],
    },
    Service {
        id: "cloud",
        title: "Cloud & Infrastructure",
        description: "Modern infrastructure on AWS and GCP with high availability and automated scaling.",
        icon: "fa-cloud",
        features: &["Serverless Architecture", "Kubernetes Orchestration", "DevOps Automation", "Disaster Recovery"],
    },
];

pub const PROCESS_STEPS: &[(&str, &str, &str)] = &[
    ("01", "Discovery & Strategy", "We map your goals, audience and market into a clear roadmap."),
    ("02", "Design & Prototyping", "Interactive prototypes validate the experience early."),
    ("03", "Agile Development", "Sprints with working software at the end of each one."),
    ("04", "Quality Assurance", "Manual and automated testing before anything ships."),
    ("05", "Launch & Evolution", "Deployment, monitoring and iteration on real feedback."),
];

const PROJECTS_JSON: &str = include_str!("../content/projects.json");

thread_local! {
    static CATALOG: Rc<Catalog> = Rc::new(Catalog::new(parse_projects(PROJECTS_JSON)));
}

/// The portfolio compiled into the site.
pub fn catalog() -> Rc<Catalog> {
    CATALOG.with(Rc::clone)
}

fn parse_projects(json: &str) -> Vec<Project> {
    match serde_json::from_str(json) {
        Ok(projects) => projects,
        Err(e) => {
            log::error!("Embedded project list is invalid: {}", e);
            Vec::new()
        }
    }
}
