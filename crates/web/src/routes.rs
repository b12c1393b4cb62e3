//! Which page component to mount.

use ilearning::prelude::{Course, Page, Screen};

/// Owned form of [`Screen`]. The checkout login prompt is left out so toggling it does not
/// remount the form.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// Landing page
    Home,

    /// Listing
    Courses,

    /// Detail for a course
    CourseDetail(Course),

    /// Detail with nothing selected
    CourseNotFound,

    /// Login
    Auth,

    /// Cart
    Cart,

    /// Checkout
    Checkout,

    /// Contact form
    Contact,

    /// Account
    Profile,

    /// Informational copy
    Content(Page),
}

impl From<Screen<'_>> for Route {
    fn from(screen: Screen<'_>) -> Self {
        match screen {
            Screen::Home => Route::Home,
            Screen::Courses => Route::Courses,
            Screen::CourseDetail(course) => Route::CourseDetail(course.clone()),
            Screen::CourseNotFound => Route::CourseNotFound,
            Screen::Auth => Route::Auth,
            Screen::Cart => Route::Cart,
            Screen::Checkout { .. } => Route::Checkout,
            Screen::Contact => Route::Contact,
            Screen::Profile => Route::Profile,
            Screen::About => Route::Content(Page::About),
            Screen::Consulting => Route::Content(Page::Consulting),
            Screen::Resources => Route::Content(Page::Resources),
            Screen::Organisations => Route::Content(Page::Organisations),
            Screen::CorporateTraining => Route::Content(Page::CorporateTraining),
            Screen::CaseStudies => Route::Content(Page::CaseStudies),
            Screen::PrivacyPolicy => Route::Content(Page::PrivacyPolicy),
            Screen::Terms => Route::Content(Page::Terms),
        }
    }
}

#[cfg(test)]
mod tests {
    use ilearning::prelude::{CourseId, Storefront};
    use testresult::TestResult;

    use crate::content::content_for;

    use super::*;

    #[test]
    fn test_checkout_prompt_does_not_change_route() {
        assert_eq!(
            Route::from(Screen::Checkout { auth_prompt: true }),
            Route::from(Screen::Checkout { auth_prompt: false })
        );
    }

    #[test]
    fn test_every_content_route_has_copy() -> TestResult {
        let mut store = Storefront::reference()?;

        for page in Page::ALL {
            store.navigate(page);

            if let Route::Content(page) = Route::from(store.screen()) {
                assert!(content_for(page).is_some(), "{page} has no copy");
            }
        }

        Ok(())
    }

    #[test]
    fn test_opened_course_routes_to_detail() -> TestResult {
        let mut store = Storefront::reference()?;

        store.open_course(CourseId(3));
        store.navigate(Page::CourseDetail);

        let Route::CourseDetail(course) = Route::from(store.screen()) else {
            return Err("expected course detail".into());
        };

        assert_eq!(course.id(), CourseId(3));

        Ok(())
    }
}
