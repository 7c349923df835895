use super::schema::*;

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = users, treat_none_as_null = true)]
pub struct NewUser<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub bio: &'a str,
    pub photo: Option<&'a str>,
    pub joined_at: i64,
    pub distance: f64,
    pub helped_count: i64,
    pub users_helped: i64,
    pub rating_sum: i64,
    pub notify: bool,
}

#[derive(Queryable)]
pub struct UserEntity {
    pub rowid: i64,
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub bio: String,
    pub photo: Option<String>,
    pub joined_at: i64,
    pub distance: f64,
    pub helped_count: i64,
    pub users_helped: i64,
    pub rating_sum: i64,
    pub notify: bool,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = experienced_routes)]
pub struct NewExperiencedRoute<'a> {
    pub id: &'a str,
    pub owner: &'a str,
    pub route: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub days: i64,
    pub start_point_name: &'a str,
    pub end_point_name: &'a str,
    pub name: &'a str,
    pub length: f64,
    pub deleted: bool,
}

#[derive(Queryable)]
pub struct ExperiencedRouteEntity {
    pub rowid: i64,
    pub id: String,
    pub owner: String,
    pub route: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub days: i64,
    pub start_point_name: String,
    pub end_point_name: String,
    pub name: String,
    pub length: f64,
    pub deleted: bool,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = inexperienced_routes)]
pub struct NewInexperiencedRoute<'a> {
    pub id: &'a str,
    pub owner: &'a str,
    pub start_point: String,
    pub start_point_name: &'a str,
    pub end_point: String,
    pub end_point_name: &'a str,
    pub arrival_datetime: String,
    pub radius: f64,
    pub notify_owner: bool,
    pub reusable: bool,
    pub name: &'a str,
    pub deleted: bool,
}

#[derive(Queryable)]
pub struct InexperiencedRouteEntity {
    pub rowid: i64,
    pub id: String,
    pub owner: String,
    pub start_point: String,
    pub start_point_name: String,
    pub end_point: String,
    pub end_point_name: String,
    pub arrival_datetime: String,
    pub radius: f64,
    pub notify_owner: bool,
    pub reusable: bool,
    pub name: String,
    pub deleted: bool,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = buddy_requests)]
pub struct NewBuddyRequest<'a> {
    pub id: &'a str,
    pub owner: &'a str,
    pub experienced_user: &'a str,
    pub experienced_route: &'a str,
    pub experienced_route_name: &'a str,
    pub inexperienced_route: &'a str,
    pub inexperienced_route_name: &'a str,
    pub meeting_point: String,
    pub meeting_point_name: &'a str,
    pub meeting_time: String,
    pub divorce_point: String,
    pub divorce_point_name: &'a str,
    pub divorce_time: String,
    pub route: String,
    pub length: f64,
    pub average_speed: f64,
    pub reason: &'a str,
    pub review: i64,
    pub status: &'a str,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Queryable)]
pub struct BuddyRequestEntity {
    pub rowid: i64,
    pub id: String,
    pub owner: String,
    pub experienced_user: String,
    pub experienced_route: String,
    pub experienced_route_name: String,
    pub inexperienced_route: String,
    pub inexperienced_route_name: String,
    pub meeting_point: String,
    pub meeting_point_name: String,
    pub meeting_time: String,
    pub divorce_point: String,
    pub divorce_point_name: String,
    pub divorce_time: String,
    pub route: String,
    pub length: f64,
    pub average_speed: f64,
    pub reason: String,
    pub review: i64,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}
