use crate::views::layout::{page, Chrome};

const FEATURES: [(&str, &str); 4] = [
    ("Live Tracking", "Follow your driver on the map from pickup to drop-off."),
    ("Verified Drivers", "Every driver is checked by our team before their first ride."),
    ("Fair Pricing", "Upfront pricing and special discounts for frequent riders."),
    ("Rate Every Ride", "Ratings keep the community safe and the service honest."),
];

const STEPS: [(&str, &str); 3] = [
    ("Pick your route", "Tap your pickup and destination on the map."),
    ("Get matched", "A nearby driver accepts your request."),
    ("Ride and rate", "Arrive, pay and leave a rating for your driver."),
];

const TESTIMONIALS: [(&str, &str); 3] = [
    ("Nadia R.", "Booking takes seconds and the drivers are always on time."),
    ("Karim H.", "Driving with TrackSy lets me choose my own hours."),
    ("Sami A.", "The discount codes make my daily commute much cheaper."),
];

fn cards(items: &[(&str, &str)]) -> String {
    items
        .iter()
        .map(|(title, text)| format!("<div class=\"card\"><h3>{title}</h3><p>{text}</p></div>"))
        .collect()
}

pub fn home_page(chrome: &Chrome) -> String {
    let cta = match chrome.user {
        Some(user) => format!(
            "<a class=\"button\" href=\"{}\">Go to your dashboard</a>",
            user.role.dashboard_home()
        ),
        None => "<a class=\"button\" href=\"/register\">Get Started</a>".to_string(),
    };

    let testimonials: String = TESTIMONIALS
        .iter()
        .map(|(who, quote)| format!("<blockquote class=\"card\">&ldquo;{quote}&rdquo;<footer>{who}</footer></blockquote>"))
        .collect();

    let body = format!(
        "<section><h1>Your ride, tracked end to end</h1>\
<p>Book a ride in a few taps and follow it all the way to your door.</p>\
<p><a class=\"button\" href=\"/bookRide\">Book a Ride</a> {cta}</p></section>\
<section><h2>Why TrackSy</h2><div class=\"cards\">{features}</div></section>\
<section><h2>How It Works</h2><div class=\"cards\">{steps}</div></section>\
<section><h2>Drive with TrackSy</h2><p>Earn on your own schedule with a verified account.</p>\
<p><a href=\"/register-driver\">Become a driver</a></p></section>\
<section><h2>What People Say</h2><div class=\"cards\">{testimonials}</div></section>",
        features = cards(&FEATURES),
        steps = cards(&STEPS),
    );

    page("Home", chrome, &body)
}

pub fn about_page(chrome: &Chrome) -> String {
    let body = "<h1>About TrackSy</h1>\
<p>TrackSy connects riders with verified drivers across the city. We started with a simple \
goal: rides that are easy to book, safe to take and fair to everyone involved.</p>\
<h2>Our Mission</h2><p>Make every trip transparent, from the fare you see before booking to \
the rating you leave after arrival.</p>\
<h2>Our Values</h2><ul><li>Safety first</li><li>Fair pay for drivers</li>\
<li>Honest pricing for riders</li></ul>";

    page("About", chrome, body)
}

pub fn contact_page(chrome: &Chrome) -> String {
    let body = "<h1>Contact Us</h1><div class=\"cards\">\
<div class=\"card\"><h3>Phone Number</h3><p>+880 1700-000000</p></div>\
<div class=\"card\"><h3>General Inquiry</h3><p>hello@tracksy.app</p></div>\
<div class=\"card\"><h3>Driver Support</h3><p>drivers@tracksy.app</p></div>\
<div class=\"card\"><h3>Business Hours</h3><p>Mon-Fri: 9:00 AM - 6:00 PM EST</p>\
<p>Sat-Sun: 10:00 AM - 4:00 PM EST</p><p>24/7 Emergency Support Available</p></div></div>";

    page("Contact", chrome, body)
}
