mod rejection;
mod route_table;
