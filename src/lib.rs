pub mod shared {
    pub mod core {
        pub mod primitives;
    }
    pub mod infrastructure {
        pub mod event_store;
    }
}

pub mod modules {
    pub mod planning {
        pub mod core {
            pub mod errors;
            pub mod forecast;
            pub mod hierarchy;
            pub mod ports;
            pub mod scenario;
            pub mod schedule_resolver;
            pub mod scheduling;
            pub mod time_off;
            pub mod time_off_index;
            pub mod work_calendar;
        }
        pub mod use_cases {
            pub mod errors;
            pub mod inputs;
            pub mod forecast_task {
                pub mod handler;
            }
            pub mod forecast_project {
                pub mod handler;
            }
            pub mod forecast_assignment {
                pub mod handler;
            }
            pub mod resolve_schedule {
                pub mod handler;
            }
            pub mod inbound {
                pub mod graphql;
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod directory_in_memory;
            }
        }
    }

    pub mod work_log {
        pub mod core {
            pub mod events;
            pub mod evolve;
            pub mod projections;
            pub mod state;
        }
        pub mod use_cases {
            pub mod register_entry {
                pub mod command;
                pub mod decide;
                pub mod decision;
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                }
            }
            pub mod list_entries {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                }
                pub mod projection;
                pub mod queries_port;
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod projections;
                pub mod projections_in_memory;
            }
        }
    }
}

pub mod shell;
