//! Behaviour tests for the composed home page.
//!
//! The page runs against recording doubles so the scenarios can assert the
//! order of API calls as well as the rendered state.

use std::cell::RefCell;
use std::num::NonZeroU32;
use std::sync::Arc;

use frontend::domain::ports::{ApiError, Dimensions};
use frontend::domain::{FormStatus, PositionId, RegistrationReceipt, ShowMore, SubmitError};
use frontend::page::HomePage;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::{Builder, Runtime};

mod support;

use support::doubles::{PositionsCall, RecordingPositionsApi, RecordingUsersApi, StubProbe};
use support::{jpeg_candidate, users_page};

const DUPLICATE_MESSAGE: &str = "User with this phone or email already exist";

struct HomePageWorld {
    runtime: Runtime,
    users_api: RefCell<Option<RecordingUsersApi>>,
    positions_api: RefCell<Option<RecordingPositionsApi>>,
    page: RefCell<Option<HomePage>>,
    outcome: RefCell<Option<Result<RegistrationReceipt, SubmitError>>>,
}

impl HomePageWorld {
    fn new() -> Self {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("create runtime");
        Self {
            runtime,
            users_api: RefCell::new(None),
            positions_api: RefCell::new(None),
            page: RefCell::new(None),
            outcome: RefCell::new(None),
        }
    }

    fn users_api(&self) -> RecordingUsersApi {
        self.users_api.borrow().clone().expect("users API configured")
    }

    fn positions_api(&self) -> RecordingPositionsApi {
        self.positions_api
            .borrow()
            .clone()
            .expect("positions API configured")
    }

    fn mount(&self) {
        let mut page = HomePage::new(
            Arc::new(self.users_api()),
            Arc::new(self.positions_api()),
            Arc::new(StubProbe(Dimensions {
                width: 100,
                height: 100,
            })),
            NonZeroU32::new(2).expect("non-zero"),
        );
        let report = self.runtime.block_on(page.mount());
        assert!(report.is_complete(), "mount failed: {report:?}");
        *self.page.borrow_mut() = Some(page);
    }

    fn with_page<T>(&self, f: impl FnOnce(&mut HomePage) -> T) -> T {
        let mut page = self.page.borrow_mut();
        f(page.as_mut().expect("page mounted"))
    }
}

#[fixture]
fn world() -> HomePageWorld {
    HomePageWorld::new()
}

#[given("a roster of two pages with timestamps 5 3 and 4 1")]
fn a_roster_of_two_pages(world: &HomePageWorld) {
    *world.users_api.borrow_mut() = Some(RecordingUsersApi::serving([
        users_page(1, 2, &[5, 3]),
        users_page(2, 2, &[4, 1]),
    ]));
}

#[given("a positions API accepting registrations")]
fn a_positions_api_accepting_registrations(world: &HomePageWorld) {
    *world.positions_api.borrow_mut() = Some(RecordingPositionsApi::accepting());
}

#[given("a positions API rejecting registrations as duplicates")]
fn a_positions_api_rejecting_registrations(world: &HomePageWorld) {
    *world.positions_api.borrow_mut() = Some(RecordingPositionsApi::rejecting(
        ApiError::validation(DUPLICATE_MESSAGE),
    ));
}

#[when("the home page mounts")]
fn the_home_page_mounts(world: &HomePageWorld) {
    world.mount();
}

#[when("the visitor asks for more users")]
fn the_visitor_asks_for_more_users(world: &HomePageWorld) {
    let runtime = &world.runtime;
    world.with_page(|page| {
        runtime
            .block_on(page.show_more())
            .expect("next page loads");
    });
}

#[when("a valid registration is submitted")]
fn a_valid_registration_is_submitted(world: &HomePageWorld) {
    let runtime = &world.runtime;
    let outcome = world.with_page(|page| {
        runtime.block_on(async {
            let form = page.form_mut();
            form.set_name("Ada Lovelace");
            form.set_email("ada@example.test");
            form.set_phone("067 123 45 67");
            form.blur_phone();
            form.select_position(Some(PositionId::new(4)));
            form.set_photo(Some(jpeg_candidate())).await;
            assert!(form.can_submit(), "form should be submittable");
            page.register().await
        })
    });
    *world.outcome.borrow_mut() = Some(outcome);
}

#[then("the users are listed with timestamps 5 4 3 1")]
fn the_users_are_listed_newest_first(world: &HomePageWorld) {
    world.with_page(|page| {
        let order: Vec<i64> = page
            .users()
            .users()
            .iter()
            .map(|user| user.registration_timestamp)
            .collect();
        assert_eq!(order, vec![5, 4, 3, 1]);
    });
}

#[then("show more is hidden")]
fn show_more_is_hidden(world: &HomePageWorld) {
    world.with_page(|page| {
        assert_eq!(page.users().show_more(), ShowMore::Hidden);
        assert!(!page.render().contains("[Show more]"));
    });
}

#[then("one token fetch precedes exactly one submission")]
fn one_token_fetch_precedes_one_submission(world: &HomePageWorld) {
    let outcome = world.outcome.borrow();
    let receipt = outcome
        .as_ref()
        .expect("submission attempted")
        .as_ref()
        .expect("registration accepted");
    assert_eq!(
        receipt.message.as_deref(),
        Some("New user successfully registered")
    );
    assert_eq!(
        world.positions_api().calls(),
        vec![
            PositionsCall::Positions,
            PositionsCall::Token,
            PositionsCall::Submit {
                token: "token-2".to_owned(),
                phone: "+380671234567".to_owned(),
            },
        ]
    );
}

#[then("the roster is reloaded from page one")]
fn the_roster_is_reloaded_from_page_one(world: &HomePageWorld) {
    assert_eq!(world.users_api().requested(), vec![1, 2, 1]);
    world.with_page(|page| {
        assert_eq!(page.users().current_page(), Some(1));
        assert_eq!(page.users().users().len(), 2);
        assert_eq!(page.users().show_more(), ShowMore::Enabled);
    });
}

#[then("the form is cleared")]
fn the_form_is_cleared(world: &HomePageWorld) {
    world.with_page(|page| {
        let form = page.form();
        assert_eq!(form.status(), &FormStatus::Succeeded);
        assert_eq!(form.name().value(), "");
        assert_eq!(form.phone().value(), "+380");
        assert!(page.render().contains("User successfully registered"));
    });
}

#[then("the banner shows the duplicate message")]
fn the_banner_shows_the_duplicate_message(world: &HomePageWorld) {
    let outcome = world.outcome.borrow();
    let error = outcome
        .as_ref()
        .expect("submission attempted")
        .as_ref()
        .expect_err("registration rejected");
    assert_eq!(
        error,
        &SubmitError::Api(ApiError::validation(DUPLICATE_MESSAGE))
    );
    world.with_page(|page| {
        assert_eq!(page.form().banner(), Some(DUPLICATE_MESSAGE));
        assert_eq!(page.form().name().value(), "Ada Lovelace");
        assert!(page.form().can_submit());
    });
}

#[then("the roster is not reloaded")]
fn the_roster_is_not_reloaded(world: &HomePageWorld) {
    assert_eq!(world.users_api().requested(), vec![1]);
}

#[scenario(
    path = "tests/features/home_page.feature",
    name = "Pages merge newest first until the listing is exhausted"
)]
fn pages_merge_newest_first(world: HomePageWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/home_page.feature",
    name = "A successful registration reloads the roster from page one"
)]
fn successful_registration_reloads_roster(world: HomePageWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/home_page.feature",
    name = "A rejected registration keeps the form and the roster"
)]
fn rejected_registration_keeps_form(world: HomePageWorld) {
    drop(world);
}
