//! Course cards, the listing page, course detail and home.

use ilearning::prelude::{
    CategoryFilter, Course, CourseId, ListingQuery, Page, PriceBucket, SortMode, Storefront,
    format_price,
};
use leptos::prelude::*;

use crate::shop::Shop;

/// Rating and enrolment line.
pub fn rating_label(course: &Course) -> String {
    format!("★ {} ({} students)", course.rating(), course.students())
}

fn update_query(shop: Shop, change: impl FnOnce(&mut ListingQuery)) {
    shop.act(|store| {
        let mut query = store.listing_query().clone();
        change(&mut query);
        store.set_listing_query(query);
    });
}

fn open(shop: Shop, id: CourseId) {
    shop.act(|store| store.open_course(id));
    shop.navigate(Page::CourseDetail);
}

/// Summary card used by the listing and home pages.
#[component]
pub fn CourseCard(shop: Shop, course: Course) -> impl IntoView {
    let id = course.id();
    let original = course.original_price().map(format_price);

    view! {
        <article class="course-card">
            <img src=course.image().to_string() alt=course.title().to_string() />
            <div class="course-card-body">
                <span class="course-category">{course.category().to_string()}</span>
                <h3>
                    <button type="button" class="course-link" on:click=move |_| open(shop, id)>
                        {course.title().to_string()}
                    </button>
                </h3>
                <p class="course-meta">
                    {course.duration().to_string()} " · " {course.level().label()}
                </p>
                <p class="course-rating">{rating_label(&course)}</p>
                <p class="course-price">
                    <span>{format_price(course.price())}</span>
                    {original.map(|price| view! { <s class="course-original-price">{price}</s> })}
                </p>
                <div class="course-actions">
                    <button type="button" on:click=move |_| open(shop, id)>
                        "View Details"
                    </button>
                    <button
                        type="button"
                        class="button-primary"
                        on:click=move |_| {
                            shop.act(|store| store.add_to_cart(id));
                        }
                    >
                        "Add to Cart"
                    </button>
                </div>
            </div>
        </article>
    }
}

#[component]
fn ListingControls(shop: Shop) -> impl IntoView {
    let categories = shop.store.with_untracked(|store| {
        store
            .catalog()
            .categories()
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>()
    });
    let query = move || shop.store.with(|store| store.listing_query().clone());

    view! {
        <div class="listing-controls">
            <input
                type="search"
                placeholder="Search courses..."
                aria-label="Search courses"
                prop:value=move || query().search
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    update_query(shop, |query| query.search = value);
                }
            />
            <select
                aria-label="Category"
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    update_query(shop, |query| query.category = CategoryFilter::from(value.as_str()));
                }
            >
                <option value="all" selected=move || query().category == CategoryFilter::All>
                    "All Categories"
                </option>
                {categories
                    .into_iter()
                    .map(|category| {
                        let selected = category.clone();
                        let value = category.clone();

                        view! {
                            <option
                                value=value
                                selected=move || query().category.value() == selected
                            >
                                {category}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
            <select
                aria-label="Price"
                on:change=move |ev| {
                    if let Ok(price) = event_target_value(&ev).parse::<PriceBucket>() {
                        update_query(shop, |query| query.price = price);
                    }
                }
            >
                {PriceBucket::ALL
                    .into_iter()
                    .map(|bucket| {
                        view! {
                            <option value=bucket.slug() selected=move || query().price == bucket>
                                {bucket.label()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
            <select
                aria-label="Sort by"
                on:change=move |ev| {
                    if let Ok(sort) = event_target_value(&ev).parse::<SortMode>() {
                        update_query(shop, |query| query.sort = sort);
                    }
                }
            >
                {SortMode::ALL
                    .into_iter()
                    .map(|mode| {
                        view! {
                            <option value=mode.slug() selected=move || query().sort == mode>
                                {mode.label()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

/// Searchable, filterable course listing.
#[component]
pub fn CoursesPage(shop: Shop) -> impl IntoView {
    let listing = move || {
        shop.store.with(|store| {
            let view = store.listing_view();
            let courses: Vec<Course> = view.courses.into_iter().cloned().collect();

            (courses, view.summary, view.clear_filters)
        })
    };

    view! {
        <section class="page courses-page">
            <h1>"All Courses"</h1>
            <ListingControls shop=shop />
            {move || {
                let (courses, summary, clear_filters) = listing();

                view! {
                    <p class="listing-summary">{summary}</p>
                    {clear_filters
                        .then(|| {
                            view! {
                                <div class="listing-empty">
                                    <p>"No courses match your search."</p>
                                    <button
                                        type="button"
                                        on:click=move |_| shop.act(Storefront::clear_filters)
                                    >
                                        "Clear Filters"
                                    </button>
                                </div>
                            }
                        })}
                    <div class="course-grid">
                        {courses
                            .into_iter()
                            .map(|course| view! { <CourseCard shop=shop course=course /> })
                            .collect_view()}
                    </div>
                }
            }}
        </section>
    }
}

/// Detail page for the selected course.
#[component]
pub fn CourseDetailPage(shop: Shop, course: Course) -> impl IntoView {
    let id = course.id();
    let savings = course.savings().map(|savings| format!("Save {}", format_price(&savings)));
    let in_cart = move || shop.store.with(|store| store.cart().contains(id));

    view! {
        <section class="page course-detail">
            <button type="button" class="back-link" on:click=move |_| shop.navigate(Page::Courses)>
                "← Back to Courses"
            </button>
            <img src=course.image().to_string() alt=course.title().to_string() />
            <span class="course-category">{course.category().to_string()}</span>
            <h1>{course.title().to_string()}</h1>
            <p>{course.description().to_string()}</p>
            <p class="course-meta">
                {course.duration().to_string()} " · " {course.level().label()} " · "
                {rating_label(&course)}
            </p>
            <h2>"What you'll learn"</h2>
            <ul class="course-highlights">
                {course
                    .highlights()
                    .iter()
                    .map(|highlight| view! { <li>{highlight.clone()}</li> })
                    .collect_view()}
            </ul>
            <aside class="course-purchase">
                <p class="course-price">{format_price(course.price())}</p>
                {savings.map(|savings| view! { <p class="course-savings">{savings}</p> })}
                <button
                    type="button"
                    class="button-primary"
                    on:click=move |_| {
                        shop.act(|store| store.enroll_now(id));
                    }
                >
                    "Enroll Now"
                </button>
                <button
                    type="button"
                    disabled=in_cart
                    on:click=move |_| {
                        shop.act(|store| store.add_to_cart(id));
                    }
                >
                    {move || if in_cart() { "In Cart" } else { "Add to Cart" }}
                </button>
            </aside>
        </section>
    }
}

/// Shown when the detail page is reached with no course selected.
#[component]
pub fn CourseNotFoundPage(shop: Shop, recovery: Page) -> impl IntoView {
    view! {
        <section class="page not-found">
            <h1>"Course not found"</h1>
            <p>"The course you are looking for is not available."</p>
            <button type="button" on:click=move |_| shop.navigate(recovery)>
                "Browse Courses"
            </button>
        </section>
    }
}

/// Landing page with featured courses.
#[component]
pub fn HomePage(shop: Shop) -> impl IntoView {
    let featured: Vec<Course> =
        shop.store.with_untracked(|store| store.catalog().featured().cloned().collect());

    view! {
        <section class="page home">
            <div class="hero">
                <h1>"Advance your career with accredited training"</h1>
                <p>"Project management, agile and quality courses led by practitioners."</p>
                <button
                    type="button"
                    class="button-primary"
                    on:click=move |_| shop.navigate(Page::Courses)
                >
                    "Browse Courses"
                </button>
            </div>
            <h2>"Featured Courses"</h2>
            <div class="course-grid">
                {featured
                    .into_iter()
                    .map(|course| view! { <CourseCard shop=shop course=course /> })
                    .collect_view()}
            </div>
        </section>
    }
}
