///////////////////////////////////////////////////////////////////////
// Users
///////////////////////////////////////////////////////////////////////

table! {
    users (rowid) {
        rowid -> BigInt,
        id -> Text,
        name -> Text,
        email -> Nullable<Text>,
        bio -> Text,
        photo -> Nullable<Text>,
        joined_at -> BigInt,
        distance -> Double,
        helped_count -> BigInt,
        users_helped -> BigInt,
        rating_sum -> BigInt,
        notify -> Bool,
    }
}

///////////////////////////////////////////////////////////////////////
// Routes
///////////////////////////////////////////////////////////////////////

table! {
    experienced_routes (rowid) {
        rowid -> BigInt,
        id -> Text,
        owner -> Text,
        route -> Text,
        departure_time -> Text,
        arrival_time -> Text,
        days -> BigInt,
        start_point_name -> Text,
        end_point_name -> Text,
        name -> Text,
        length -> Double,
        deleted -> Bool,
    }
}

table! {
    inexperienced_routes (rowid) {
        rowid -> BigInt,
        id -> Text,
        owner -> Text,
        start_point -> Text,
        start_point_name -> Text,
        end_point -> Text,
        end_point_name -> Text,
        arrival_datetime -> Text,
        radius -> Double,
        notify_owner -> Bool,
        reusable -> Bool,
        name -> Text,
        deleted -> Bool,
    }
}

///////////////////////////////////////////////////////////////////////
// Buddy requests
///////////////////////////////////////////////////////////////////////

table! {
    buddy_requests (rowid) {
        rowid -> BigInt,
        id -> Text,
        owner -> Text,
        experienced_user -> Text,
        experienced_route -> Text,
        experienced_route_name -> Text,
        inexperienced_route -> Text,
        inexperienced_route_name -> Text,
        meeting_point -> Text,
        meeting_point_name -> Text,
        meeting_time -> Text,
        divorce_point -> Text,
        divorce_point_name -> Text,
        divorce_time -> Text,
        route -> Text,
        length -> Double,
        average_speed -> Double,
        reason -> Text,
        review -> BigInt,
        status -> Text,
        created_at -> BigInt,
        updated_at -> BigInt,
    }
}

allow_tables_to_appear_in_same_query!(
    users,
    experienced_routes,
    inexperienced_routes,
    buddy_requests,
);
