#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = OK, description = "Plain-text listing of the available data routes", body = String, content_type = "text/plain")
    ))]
pub async fn index() -> &'static str {
    "Welcome to the Hawaii Climate API!\n\
     Available routes:\n\
     /api/v1.0/precipitation - precipitation for the last twelve months of data\n\
     /api/v1.0/stations - list of weather stations\n\
     /api/v1.0/tobs - temperature observations for the most active station over the last twelve months\n\
     /api/v1.0/<start> - min, avg, and max temperature from the start date onward\n\
     /api/v1.0/<start>/<end> - min, avg, and max temperature between the two dates (inclusive)\n\
     Dates use the format YYYY-mm-dd.\n"
}
