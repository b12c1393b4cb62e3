//! Navigation
//!
//! A closed set of pages, the currently shown page and the course context carried into the
//! course detail page. There is no history stack; every move is a direct jump.

use std::{fmt, str::FromStr};

use thiserror::Error;
use tracing::debug;

use crate::courses::Course;

/// A slug that names no page.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown page: {0}")]
pub struct UnknownPage(pub String);

/// Page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Page {
    /// Landing page
    #[default]
    Home,

    /// About us
    About,

    /// Course listing
    Courses,

    /// Single course, needs a selected course
    CourseDetail,

    /// Log in / sign up
    Auth,

    /// Shopping cart
    Cart,

    /// Checkout form
    Checkout,

    /// Contact form
    Contact,

    /// Consulting services
    Consulting,

    /// Resources
    Resources,

    /// Organisations we work with
    Organisations,

    /// Corporate training
    CorporateTraining,

    /// Case studies
    CaseStudies,

    /// Privacy policy
    PrivacyPolicy,

    /// Terms of service
    Terms,

    /// User profile
    Profile,
}

impl Page {
    /// Every page.
    pub const ALL: [Page; 16] = [
        Page::Home,
        Page::About,
        Page::Courses,
        Page::CourseDetail,
        Page::Auth,
        Page::Cart,
        Page::Checkout,
        Page::Contact,
        Page::Consulting,
        Page::Resources,
        Page::Organisations,
        Page::CorporateTraining,
        Page::CaseStudies,
        Page::PrivacyPolicy,
        Page::Terms,
        Page::Profile,
    ];

    /// Pages in the header menu.
    pub const MENU: [Page; 4] = [Page::Home, Page::About, Page::Courses, Page::Contact];

    /// Pages linked from the footer.
    pub const FOOTER: [Page; 4] = [Page::PrivacyPolicy, Page::Terms, Page::Auth, Page::Courses];

    /// URL-style slug.
    pub fn slug(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::About => "about",
            Page::Courses => "courses",
            Page::CourseDetail => "course-detail",
            Page::Auth => "auth",
            Page::Cart => "cart",
            Page::Checkout => "checkout",
            Page::Contact => "contact",
            Page::Consulting => "consulting",
            Page::Resources => "resources",
            Page::Organisations => "organisations",
            Page::CorporateTraining => "corporate-training",
            Page::CaseStudies => "case-studies",
            Page::PrivacyPolicy => "privacy-policy",
            Page::Terms => "terms",
            Page::Profile => "profile",
        }
    }

    /// Link text.
    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::About => "About",
            Page::Courses => "Courses",
            Page::CourseDetail => "Course Details",
            Page::Auth => "Login",
            Page::Cart => "Cart",
            Page::Checkout => "Checkout",
            Page::Contact => "Contact",
            Page::Consulting => "Consulting",
            Page::Resources => "Resources",
            Page::Organisations => "Organisations",
            Page::CorporateTraining => "Corporate Training",
            Page::CaseStudies => "Case Studies",
            Page::PrivacyPolicy => "Privacy Policy",
            Page::Terms => "Terms of Service",
            Page::Profile => "Profile",
        }
    }

    /// Parse a slug, falling back to [`Page::Home`].
    pub fn from_slug_or_home(slug: &str) -> Self {
        slug.parse().unwrap_or_default()
    }
}

impl FromStr for Page {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|page| page.slug() == s)
            .ok_or_else(|| UnknownPage(s.to_string()))
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// What should be rendered for the current page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen<'a> {
    /// Landing page
    Home,

    /// About us
    About,

    /// Course listing
    Courses,

    /// Detail of the selected course
    CourseDetail(&'a Course),

    /// Course detail was requested with no course selected; offers a way back to the listing.
    CourseNotFound,

    /// Log in / sign up
    Auth,

    /// Shopping cart
    Cart,

    /// Checkout, with or without the inline login prompt
    Checkout {
        /// Whether the inline login prompt is shown
        auth_prompt: bool,
    },

    /// Contact form
    Contact,

    /// Consulting services
    Consulting,

    /// Resources
    Resources,

    /// Organisations
    Organisations,

    /// Corporate training
    CorporateTraining,

    /// Case studies
    CaseStudies,

    /// Privacy policy
    PrivacyPolicy,

    /// Terms of service
    Terms,

    /// User profile
    Profile,
}

impl Screen<'_> {
    /// Page the user is sent to from [`Screen::CourseNotFound`].
    pub const NOT_FOUND_RECOVERY: Page = Page::Courses;
}

/// Navigator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Navigator {
    current: Page,
    selected: Option<Course>,
}

impl Navigator {
    /// A navigator on the home page with no course selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current page.
    pub fn current(&self) -> Page {
        self.current
    }

    /// Course carried into the detail page, if any.
    pub fn selected_course(&self) -> Option<&Course> {
        self.selected.as_ref()
    }

    /// Jump to a page. Unguarded; the selected course is kept.
    pub fn navigate(&mut self, page: Page) {
        debug!(from = %self.current, to = %page, "navigate");

        self.current = page;
    }

    /// Select a course and show its detail page.
    pub fn open_course(&mut self, course: &Course) {
        self.selected = Some(course.clone());
        self.navigate(Page::CourseDetail);
    }

    /// Resolve the current page into a screen.
    pub fn screen(&self, auth_prompt: bool) -> Screen<'_> {
        match self.current {
            Page::Home => Screen::Home,
            Page::About => Screen::About,
            Page::Courses => Screen::Courses,
            Page::CourseDetail => self
                .selected
                .as_ref()
                .map_or(Screen::CourseNotFound, Screen::CourseDetail),
            Page::Auth => Screen::Auth,
            Page::Cart => Screen::Cart,
            Page::Checkout => Screen::Checkout { auth_prompt },
            Page::Contact => Screen::Contact,
            Page::Consulting => Screen::Consulting,
            Page::Resources => Screen::Resources,
            Page::Organisations => Screen::Organisations,
            Page::CorporateTraining => Screen::CorporateTraining,
            Page::CaseStudies => Screen::CaseStudies,
            Page::PrivacyPolicy => Screen::PrivacyPolicy,
            Page::Terms => Screen::Terms,
            Page::Profile => Screen::Profile,
        }
    }
}
