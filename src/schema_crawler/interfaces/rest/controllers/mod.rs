pub mod schema_rest_controller;
