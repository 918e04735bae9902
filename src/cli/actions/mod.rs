use secrecy::SecretString;

pub mod create_admin;
pub mod server;

#[derive(Debug)]
pub enum Action {
    Server {
        port: u16,
        dsn: String,
        jwt_secret: SecretString,
        base_url: String,
        uploads_dir: String,
    },
    CreateAdmin {
        dsn: String,
        name: String,
        email: String,
        password: SecretString,
    },
}
