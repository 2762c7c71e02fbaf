use actix_web::web;

pub mod posts;
pub mod users;

pub fn configure(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/users")
      .service(
        web::resource("/")
          .route(web::post().to(users::create))
          .route(web::get().to(users::list)),
      )
      .service(
        web::resource("/{id}")
          .route(web::put().to(users::update))
          .route(web::delete().to(users::delete)),
      )
      .service(web::resource("/{id}/posts/").route(web::get().to(users::posts))),
  );
  cfg.service(
    web::scope("/posts")
      .service(
        web::resource("/")
          .route(web::post().to(posts::create))
          .route(web::get().to(posts::list)),
      )
      .service(
        web::resource("/{id}")
          .route(web::put().to(posts::update))
          .route(web::delete().to(posts::delete)),
      ),
  );
}
