pub mod constants;
pub mod geo_coordinate;
pub mod video_id;
pub mod waypoint;

#[cfg(test)]
pub(crate) mod test_http;
