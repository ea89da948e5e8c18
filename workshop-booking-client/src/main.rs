use tracing::info;
use workshop_booking_client::error::AppError;
use workshop_booking_client::get_config;
use workshop_booking_client::http::HttpWorkshopService;
use workshop_booking_client::models::{RankedWorkshop, UserId};
use workshop_booking_client::routes::{navigate, Navigation};
use workshop_booking_client::session::Session;
use workshop_booking_client::store::WorkshopStore;
use workshop_booking_client::telemetry::setup_logging;

fn print_ranked(ranked: &RankedWorkshop) {
    let workshop = &ranked.workshop;
    println!(
        "  #{:<3} {:>4} points  {} {}-{}  {} ({})",
        ranked.rank.0,
        workshop.points,
        workshop.date,
        workshop.start_time.format("%H:%M"),
        workshop.end_time.format("%H:%M"),
        workshop.title,
        workshop.id,
    );
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    setup_logging();
    let config = get_config()?;
    let session = Session::from_config(&config.session);
    info!(
        url = %config.url,
        authenticated = session.is_authenticated(),
        admin = session.is_admin(),
        "starting"
    );

    let service = HttpWorkshopService::new(&config.url)?.with_session(&session);
    let store = WorkshopStore::new(service, config.request_timeout());
    store.fetch_all().await?;
    let view = store.view();

    println!("Current workshops:");
    for ranked in view.current() {
        print_ranked(ranked);
    }
    println!("{} past workshops", view.past().len());

    match view.most_popular() {
        Some(ranked) => println!(
            "Most popular: {} ({})",
            ranked.workshop.title, ranked.workshop.id
        ),
        None => println!("Most popular: none"),
    }

    if let Some(user_id) = config.session.user_id.as_deref() {
        let mine = store.for_user(&UserId::from(user_id));
        println!("Upcoming for {user_id}:");
        for ranked in &mine.upcoming {
            print_ranked(ranked);
        }
        println!("Attended by {user_id}:");
        for workshop in &mine.attended {
            println!("  {} {} ({})", workshop.date, workshop.title, workshop.id);
        }
    }

    for path in std::env::args().skip(1) {
        match navigate(&session, &path) {
            Navigation::Proceed(route) => println!("{path}: proceed to {}", route.path),
            Navigation::Redirect(route) => println!("{path}: redirect to {}", route.path),
        }
    }
    Ok(())
}
