pub mod shared {
    pub mod config;
    pub mod infrastructure {
        pub mod bundle;
        pub mod docs;
        pub mod filter;
        pub mod http {
            pub mod body_parser;
            pub mod cors;
            pub mod method_override;
            pub mod problem;
        }
        pub mod interceptor;
        pub mod resolver;
    }
}

pub mod modules {
    pub mod auth {
        pub mod module;
        pub mod interceptor {
            pub mod forgot_password;
        }
        pub mod use_cases {
            pub mod forgot_password {
                pub mod inbound {
                    pub mod http;
                }
            }
        }
    }
    pub mod system {
        pub mod module;
        pub mod use_cases {
            pub mod health {
                pub mod inbound {
                    pub mod http;
                }
            }
        }
    }
}

pub mod shell;
