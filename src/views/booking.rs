use crate::utils::geo::LatLng;
use crate::utils::html::{escape, with_query};
use crate::views::components::km;
use crate::views::layout::{page_with_head, Chrome};

/// Which point the next map click sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapMode {
    #[default]
    Start,
    End,
}

impl MapMode {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("end") => MapMode::End,
            _ => MapMode::Start,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MapMode::Start => "start",
            MapMode::End => "end",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BookingPoint {
    pub point: LatLng,
    pub address: String,
}

pub struct BookingView<'a> {
    pub mode: MapMode,
    pub start: Option<BookingPoint>,
    pub end: Option<BookingPoint>,
    pub distance_km: Option<f64>,
    pub promo_code: &'a str,
    pub map_center: LatLng,
}

impl BookingView<'_> {
    pub fn is_ready(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}

const LEAFLET_HEAD: &str = "<link rel=\"stylesheet\" href=\"https://unpkg.com/leaflet@1.9.4/dist/leaflet.css\">\
<script src=\"https://unpkg.com/leaflet@1.9.4/dist/leaflet.js\"></script>";

const MAP_SCRIPT: &str = r#"<script>
(function () {
  var el = document.getElementById('map');
  var center = [parseFloat(el.dataset.lat), parseFloat(el.dataset.lng)];
  var map = L.map('map').setView(center, 13);
  L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
    attribution: '&copy; OpenStreetMap contributors'
  }).addTo(map);
  var params = new URLSearchParams(window.location.search);
  var start = params.get('start_lat') && [parseFloat(params.get('start_lat')), parseFloat(params.get('start_lng'))];
  var end = params.get('end_lat') && [parseFloat(params.get('end_lat')), parseFloat(params.get('end_lng'))];
  if (start) L.marker(start).addTo(map).bindPopup('Pickup');
  if (end) L.marker(end).addTo(map).bindPopup('Destination');
  if (start && end) {
    fetch('/api/geo/route?' + new URLSearchParams({
      start_lat: start[0], start_lng: start[1], end_lat: end[0], end_lng: end[1]
    })).then(function (r) { return r.json(); }).then(function (body) {
      if (body.success && body.data && body.data.path.length) {
        var line = L.polyline(body.data.path).addTo(map);
        map.fitBounds(line.getBounds());
      }
    });
  }
  map.on('click', function (e) {
    var mode = el.dataset.mode;
    params.set(mode + '_lat', e.latlng.lat.toFixed(6));
    params.set(mode + '_lng', e.latlng.lng.toFixed(6));
    params.set('mode', mode === 'start' ? 'end' : 'start');
    var promo = document.getElementById('promo_code');
    if (promo && promo.value) params.set('promo_code', promo.value);
    window.location.search = params.toString();
  });
})();
</script>"#;

fn point_card(label: &str, point: Option<&BookingPoint>) -> String {
    match point {
        Some(p) => format!(
            "<div class=\"card\"><h3>{label}</h3><p>{}</p><small>{}</small></div>",
            escape(&p.address),
            p.point.fallback_label()
        ),
        None => format!("<div class=\"card\"><h3>{label}</h3><p>Click on the map to set</p></div>"),
    }
}

fn hidden_point(prefix: &str, point: Option<&BookingPoint>) -> String {
    match point {
        Some(p) => format!(
            "<input type=\"hidden\" name=\"{prefix}_lat\" value=\"{}\">\
<input type=\"hidden\" name=\"{prefix}_lng\" value=\"{}\">",
            p.point.lat, p.point.lng
        ),
        None => String::new(),
    }
}

fn mode_link(view: &BookingView, mode: MapMode, label: &str) -> String {
    let class = if view.mode == mode { "active" } else { "" };
    let mut pairs: Vec<(&str, String)> = vec![("mode", mode.as_str().to_string())];
    if let Some(p) = &view.start {
        pairs.push(("start_lat", p.point.lat.to_string()));
        pairs.push(("start_lng", p.point.lng.to_string()));
    }
    if let Some(p) = &view.end {
        pairs.push(("end_lat", p.point.lat.to_string()));
        pairs.push(("end_lng", p.point.lng.to_string()));
    }
    let refs: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (*k, v.as_str())).collect();
    format!(
        "<a class=\"{class}\" href=\"{}\">{label}</a>",
        escape(&with_query("/bookRide", &refs))
    )
}

pub fn booking_page(chrome: &Chrome, view: &BookingView) -> String {
    let signed_in = chrome.user.is_some();
    let disabled = if view.is_ready() && signed_in { "" } else { " disabled" };
    let hint = if !signed_in {
        "<p><a href=\"/login?redirect=%2FbookRide\">Sign in</a> to book a ride.</p>"
    } else if !view.is_ready() {
        "<p>Set both pickup and destination to continue.</p>"
    } else {
        ""
    };

    let body = format!(
        "<h1>Where Would You Like to Go?</h1>\
<p>Set your pickup and destination locations on the map to book your ride</p>\
<nav>{start_tab} {end_tab}</nav>\
<div id=\"map\" data-mode=\"{mode}\" data-lat=\"{lat}\" data-lng=\"{lng}\"></div>\
<div class=\"cards\">{start}{end}<div class=\"card\"><h3>Distance</h3><p>{distance}</p></div></div>\
<form method=\"post\" action=\"/bookRide\">{hidden_start}{hidden_end}\
<label for=\"promo_code\">Promo code</label>\
<input id=\"promo_code\" name=\"promo_code\" placeholder=\"Enter promo code\" value=\"{promo}\">\
<p><small>Enter your discount OTP code here. The discount is applied to your fare by the server.</small></p>\
<button type=\"submit\" id=\"book\"{disabled}>Book Ride</button></form>{hint}{script}",
        start_tab = mode_link(view, MapMode::Start, "Set Pickup"),
        end_tab = mode_link(view, MapMode::End, "Set Destination"),
        mode = view.mode.as_str(),
        lat = view.map_center.lat,
        lng = view.map_center.lng,
        start = point_card("Pickup", view.start.as_ref()),
        end = point_card("Destination", view.end.as_ref()),
        distance = km(view.distance_km),
        hidden_start = hidden_point("start", view.start.as_ref()),
        hidden_end = hidden_point("end", view.end.as_ref()),
        promo = escape(view.promo_code),
        script = MAP_SCRIPT,
    );

    page_with_head("Book a Ride", chrome, LEAFLET_HEAD, &body)
}
