use crate::geo::distance_km;

pub fn cmd_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) {
    let km = distance_km(lat1, lon1, lat2, lon2);
    println!("({lat1}, {lon1}) -> ({lat2}, {lon2})");
    println!("{km:.3} km");
}
