//! Informational pages.

use ilearning::prelude::Page;
use leptos::prelude::*;

use crate::shop::Shop;

/// Copy for an informational page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Content {
    /// Page heading
    pub heading: &'static str,

    /// Lead paragraph
    pub intro: &'static str,

    /// Sub-headings with a paragraph each
    pub sections: &'static [(&'static str, &'static str)],

    /// Closing call to action, if any
    pub call_to_action: Option<(&'static str, Page)>,
}

const ABOUT: Content = Content {
    heading: "About iLearning",
    intro: "We help professionals and organisations deliver projects with confidence.",
    sections: &[
        (
            "Our Mission",
            "Practical, accredited training taught by people who run projects every day.",
        ),
        (
            "Our Approach",
            "Short courses, real case material and support that continues after class.",
        ),
    ],
    call_to_action: Some(("Browse Courses", Page::Courses)),
};

const CONSULTING: Content = Content {
    heading: "Consulting Services",
    intro: "Hands-on help setting up delivery practices that stick.",
    sections: &[
        (
            "Why Choose Our Consulting?",
            "Our consultants have led programmes across government, finance and construction.",
        ),
        (
            "Our Consulting Process",
            "Assess, design, pilot and embed, with a review at every stage.",
        ),
    ],
    call_to_action: Some(("Contact Us", Page::Contact)),
};

const RESOURCES: Content = Content {
    heading: "Resources & Tools",
    intro: "Templates, checklists and guides to use alongside our courses.",
    sections: &[
        (
            "Resource Categories",
            "Planning templates, agile ceremonies, risk registers and quality tools.",
        ),
        (
            "How to Use These Resources",
            "Start with the guide for your role, then adapt the templates to your project.",
        ),
    ],
    call_to_action: Some(("Contact Us", Page::Contact)),
};

const ORGANISATIONS: Content = Content {
    heading: "Why Organizations Choose Us",
    intro: "Training and consulting that scale from a single team to a whole portfolio.",
    sections: &[
        (
            "Our Corporate Solutions",
            "Tailored curricula, group bookings and progress reporting for managers.",
        ),
        (
            "Client Success Stories",
            "Teams that trained with us report faster delivery and fewer escalations.",
        ),
    ],
    call_to_action: Some(("Corporate Training", Page::CorporateTraining)),
};

const CORPORATE_TRAINING: Content = Content {
    heading: "Corporate Training Packages",
    intro: "Bring accredited courses to your team, on site or online.",
    sections: &[
        (
            "Flexible Delivery Options",
            "Classroom, virtual and blended formats scheduled around your calendar.",
        ),
        (
            "Our Training Process",
            "We assess skills, agree outcomes, deliver the training and measure the results.",
        ),
    ],
    call_to_action: Some(("Contact Us", Page::Contact)),
};

const CASE_STUDIES: Content = Content {
    heading: "Success Stories & Case Studies",
    intro: "How organisations improved delivery after working with us.",
    sections: &[
        (
            "Overall Impact Metrics",
            "Higher on-time delivery and certification pass rates across client teams.",
        ),
        (
            "Consistent Results Across Industries",
            "From public sector programmes to start-ups, the same practices hold up.",
        ),
    ],
    call_to_action: Some(("Contact Us", Page::Contact)),
};

const PRIVACY_POLICY: Content = Content {
    heading: "Privacy Policy",
    intro: "How we collect, use and protect your personal information.",
    sections: &[
        (
            "Data Security",
            "Personal data is stored securely and only used to provide our services.",
        ),
        (
            "Your Rights and Choices",
            "You may request access to, correction of or deletion of your data at any time.",
        ),
        (
            "Cookies and Tracking",
            "We use essential cookies only. No advertising trackers are used.",
        ),
    ],
    call_to_action: None,
};

const TERMS: Content = Content {
    heading: "Terms and Conditions",
    intro: "The terms that apply when you use this site and enrol in a course.",
    sections: &[
        (
            "Acceptance of Terms",
            "By using this site you agree to these terms.",
        ),
        (
            "User Accounts and Registration",
            "You are responsible for keeping your account details accurate and private.",
        ),
        (
            "Course Access and Completion",
            "Course material is licensed for your personal use for the duration of access.",
        ),
    ],
    call_to_action: None,
};

/// Copy for an informational page, or `None` for pages with their own component.
pub fn content_for(page: Page) -> Option<&'static Content> {
    match page {
        Page::About => Some(&ABOUT),
        Page::Consulting => Some(&CONSULTING),
        Page::Resources => Some(&RESOURCES),
        Page::Organisations => Some(&ORGANISATIONS),
        Page::CorporateTraining => Some(&CORPORATE_TRAINING),
        Page::CaseStudies => Some(&CASE_STUDIES),
        Page::PrivacyPolicy => Some(&PRIVACY_POLICY),
        Page::Terms => Some(&TERMS),
        _ => None,
    }
}

/// Renders a [`Content`] block.
#[component]
pub fn ContentPage(shop: Shop, content: &'static Content) -> impl IntoView {
    view! {
        <section class="page content-page">
            <h1>{content.heading}</h1>
            <p class="lead">{content.intro}</p>
            {content
                .sections
                .iter()
                .map(|(heading, body)| {
                    view! {
                        <h2>{*heading}</h2>
                        <p>{*body}</p>
                    }
                })
                .collect_view()}
            {content
                .call_to_action
                .map(|(label, target)| {
                    view! {
                        <button
                            type="button"
                            class="button-primary"
                            on:click=move |_| shop.navigate(target)
                        >
                            {label}
                        </button>
                    }
                })}
        </section>
    }
}
