// src/models/catalog.rs

//! Static site catalogue: services, navigation, testimonials and the
//! keyword-to-page table used by search.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Immutable catalogue, built once at start-up and passed by reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default = "defaults::services")]
    pub services: Vec<ServiceEntry>,

    #[serde(default = "defaults::nav_links")]
    pub nav_links: Vec<NavLink>,

    #[serde(default = "defaults::testimonials")]
    pub testimonials: Vec<Testimonial>,

    /// Keyword table, searched in order
    #[serde(default = "defaults::keywords")]
    pub keywords: Vec<KeywordRoute>,

    #[serde(default)]
    pub contact: ContactInfo,
}

impl Catalog {
    /// Load a catalogue from a TOML file. Missing sections use the built-in data.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load a catalogue, falling back to the built-in one.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("Catalog load failed from {:?}: {}. Using built-in.", path, e);
            Self::default()
        })
    }

    /// Check the catalogue for broken entries.
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for service in &self.services {
            if service.title.trim().is_empty() {
                return Err(AppError::validation(format!(
                    "service {} has an empty title",
                    service.id
                )));
            }
            if !ids.insert(service.id) {
                return Err(AppError::validation(format!(
                    "duplicate service id {}",
                    service.id
                )));
            }
            check_href(&service.href)?;
        }

        for link in &self.nav_links {
            check_href(&link.href)?;
            for item in &link.dropdown {
                check_href(&item.href)?;
            }
        }

        for route in &self.keywords {
            if route.keyword.trim().is_empty() {
                return Err(AppError::validation("keyword route with empty keyword"));
            }
            if route.keyword != route.keyword.to_lowercase() {
                return Err(AppError::validation(format!(
                    "keyword '{}' must be lowercase",
                    route.keyword
                )));
            }
            check_href(&route.href)?;
        }
        Ok(())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            services: defaults::services(),
            nav_links: defaults::nav_links(),
            testimonials: defaults::testimonials(),
            keywords: defaults::keywords(),
            contact: ContactInfo::default(),
        }
    }
}

fn check_href(href: &str) -> Result<()> {
    if href == "#" || href.starts_with('/') {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "href '{href}' must be site-relative"
        )))
    }
}

/// A service offered by the agency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceEntry {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub href: String,
    pub icon: String,
}

/// Top-level navigation entry. Dropdown items cannot nest further.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavLink {
    pub name: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropdown: Vec<NavItem>,
}

/// Second-level navigation entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavItem {
    pub name: String,
    pub href: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TestimonialKind {
    #[default]
    Text,
    Video,
}

/// A client testimonial.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Testimonial {
    pub id: u32,
    pub country: String,
    pub name: String,
    pub testimonial: String,
    #[serde(rename = "type", default)]
    pub kind: TestimonialKind,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub video: Option<String>,
    #[serde(default)]
    pub scholarship: bool,
}

/// Fixed keyword that routes straight to a page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeywordRoute {
    /// Lowercase keyword matched by containment in the query
    pub keyword: String,
    pub title: String,
    pub href: String,
    pub icon: String,
}

/// Agency contact details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            email: "info@cardxacademia.com".into(),
            phone: "+250788603451".into(),
            address: "1st Floor, Door F1B-013D, Town Center Building (TCB), Kigali City."
                .into(),
        }
    }
}

mod defaults {
    use super::{KeywordRoute, NavItem, NavLink, ServiceEntry, Testimonial, TestimonialKind};

    fn service(id: u32, title: &str, description: &str, href: &str, icon: &str) -> ServiceEntry {
        ServiceEntry {
            id,
            title: title.into(),
            description: description.into(),
            href: href.into(),
            icon: icon.into(),
        }
    }

    fn link(name: &str, href: &str) -> NavLink {
        NavLink {
            name: name.into(),
            href: href.into(),
            dropdown: Vec::new(),
        }
    }

    fn item(name: &str, href: &str) -> NavItem {
        NavItem {
            name: name.into(),
            href: href.into(),
        }
    }

    fn route(keyword: &str, title: &str, href: &str, icon: &str) -> KeywordRoute {
        KeywordRoute {
            keyword: keyword.into(),
            title: title.into(),
            href: href.into(),
            icon: icon.into(),
        }
    }

    fn testimonial(id: u32, country: &str, name: &str, image: &str, text: &str) -> Testimonial {
        Testimonial {
            id,
            country: country.into(),
            name: name.into(),
            testimonial: text.into(),
            kind: TestimonialKind::Text,
            image: Some(image.into()),
            video: None,
            scholarship: false,
        }
    }

    pub fn services() -> Vec<ServiceEntry> {
        vec![
            service(
                1,
                "Student Visa Application",
                "Comprehensive assistance for student visa applications to study abroad",
                "/services/student-visa",
                "graduation-cap",
            ),
            service(
                2,
                "Visitor Visa Application",
                "Expert guidance for tourist and visitor visa applications",
                "/services/visitor-visa",
                "passport",
            ),
            service(
                3,
                "Work Permit Application",
                "Professional support for work permit applications and documentation",
                "/services/work-permit",
                "briefcase",
            ),
            service(
                4,
                "Express Entry for Canada",
                "Complete Express Entry program guidance for Canadian immigration",
                "/services/express-entry",
                "map-pin",
            ),
            service(
                5,
                "University Admission Guidance",
                "Personalized assistance for university applications and admissions",
                "/services/admission",
                "book-open",
            ),
            service(
                6,
                "Air Ticketing Services",
                "Affordable flight bookings and travel arrangements worldwide",
                "/services/air-ticketing",
                "plane",
            ),
            service(
                7,
                "Document Preparation",
                "Professional help with visa and immigration document preparation",
                "/services/document-preparation",
                "file-text",
            ),
            service(
                8,
                "Immigration Consultation",
                "Expert immigration consultation and assessment services",
                "/services/immigration-consultation",
                "users",
            ),
            service(
                9,
                "Language Test Preparation",
                "Guidance for IELTS, TOEFL, and other language proficiency tests",
                "/services/language-tests",
                "languages",
            ),
            service(
                10,
                "Scholarship Applications",
                "Assistance with finding and applying for international scholarships",
                "/services/scholarships",
                "award",
            ),
        ]
    }

    pub fn nav_links() -> Vec<NavLink> {
        vec![
            link("Home", "/"),
            link("Appointment", "/appointment"),
            link("Services", "/services"),
            NavLink {
                name: "Visa Applications".into(),
                href: "/visa".into(),
                dropdown: vec![
                    item("All Visa Types", "/visa"),
                    item("Student Visa", "/visa/student"),
                    item("Work Visa", "/visa/work"),
                    item("Visitor Visa", "/visa/visitor"),
                ],
            },
            link("Israel Pilgrimage", "/israel-pilgrimage-2025"),
            link("Contact Us", "/contact"),
            link("About", "/about"),
        ]
    }

    pub fn testimonials() -> Vec<Testimonial> {
        vec![
            testimonial(
                1,
                "Germany",
                "Lisa K.",
                "https://images.unsplash.com/photo-1494790108377-be9c29b29330?w=150&h=150&fit=crop&crop=face",
                "Cardx Academia and Travel Tours helped me secure admission to a university in Germany and assisted with booking my Germany visa appointment. Their professionalism and attention to detail made the entire process easy and stress-free. I am incredibly thankful for their support and highly recommend their services to anyone seeking help with international education and visas",
            ),
            testimonial(
                2,
                "Canada",
                "Salomon Niyitanga",
                "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=150&h=150&fit=crop&crop=face",
                "I am beyond grateful to Cardx Academia and Travel Tours for helping me secure my Canadian student visa to study at Algonquin College and book my flight from Rwanda to Ottawa. Their expertise made the entire process smooth and stress free. From guiding me through the visa application to finding the best flight deal, their support was exceptional. I highly recommend their services to anyone looking for a seamless journey to study abroad.",
            ),
            testimonial(
                3,
                "Canada",
                "Olivier Niyiduhaye",
                "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=150&h=150&fit=crop&crop=face",
                "I am deeply thankful to Cardx Academia and Travel Tours for their outstanding support throughout my visa application process. With their guidance, I successfully secured my Canadian student visa and am now ready to begin my studies in Canada. Their team was incredibly helpful, from preparing my documents to following up with IRCC and ensuring every step went smoothly.",
            ),
            Testimonial {
                scholarship: true,
                ..testimonial(
                    4,
                    "Israel",
                    "Christine Twambazimana",
                    "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=150&h=150&fit=crop&crop=face",
                    "Thanks to Cardx Academia and Travel Tours, I secured full scholarship to Reichman University in Israel and successfully obtained my student visa. Their guidance throughout the scholarship application and visa process was invaluable. I felt supported every step of the way, and I couldn't have done it without their expert assistance. I highly recommend them to anyone pursuing international education",
                )
            },
        ]
    }

    pub fn keywords() -> Vec<KeywordRoute> {
        vec![
            route("appointment", "Book Appointment", "/appointment", "calendar"),
            route("book", "Book Appointment", "/appointment", "calendar"),
            route("schedule", "Book Appointment", "/appointment", "calendar"),
            route("contact", "Contact Us", "/contact", "mail"),
            route("about", "About Us", "/about", "info"),
            route("visa", "Visa Services", "/visa", "passport"),
            route("student visa", "Student Visa", "/visa/student", "graduation-cap"),
            route("work visa", "Work Visa", "/visa/work", "briefcase"),
            route("visitor visa", "Visitor Visa", "/visa/visitor", "map-pin"),
            route("israel", "Israel Pilgrimage", "/israel-pilgrimage-2025", "map-pin"),
            route("pilgrimage", "Israel Pilgrimage", "/israel-pilgrimage-2025", "map-pin"),
            route("testimonials", "Testimonials", "/testimonials", "users"),
            route("services", "Our Services", "/services", "briefcase"),
        ]
    }
}
