use crate::modules::file::handle::*;
use actix_web::web::ServiceConfig;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(upload_file)
        .service(download_file)
        .service(list_files)
        .service(delete_file);
}
