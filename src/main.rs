//! 스토어프론트 인증 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동합니다. MongoDB 연결과 모든 설정을
//! 기동 시점에 구성하고, 서비스들을 `web::Data`로 핸들러에 주입합니다.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{App, HttpServer, middleware, web};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use storefront_auth_backend::config::{AuthConfig, FederationConfig, ServerConfig};
use storefront_auth_backend::db::Database;
use storefront_auth_backend::repositories::users::UserStore;
use storefront_auth_backend::repositories::users::user_repo::UserRepository;
use storefront_auth_backend::routes::configure_all_routes;
use storefront_auth_backend::services::auth::{OAuthClient, PasswordHasher, TokenService};
use storefront_auth_backend::services::users::UserService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 스토어프론트 인증 서비스 시작중...");

    // 데이터 스토어 초기화
    let database = initialize_database().await;

    // 설정 로드 (기동 시 1회, 이후 변경 없음)
    let auth_config = AuthConfig::from_env();
    let federation_config = FederationConfig::from_env();

    // 저장소 어댑터 구성 및 유니크 인덱스 보장
    let user_repository = Arc::new(UserRepository::new(database));
    user_repository
        .create_indexes()
        .await
        .expect("사용자 컬렉션 인덱스 생성 실패");

    info!("✅ 사용자 컬렉션 인덱스 준비 완료");

    // 서비스 구성 - 모든 의존성은 여기서 명시적으로 주입된다
    let hasher = Arc::new(PasswordHasher::new(auth_config.bcrypt_cost));
    let token_service = web::Data::new(TokenService::new(&auth_config));
    let oauth_client = web::Data::new(OAuthClient::new(federation_config));
    let user_service = web::Data::new(UserService::new(
        user_repository as Arc<dyn UserStore>,
        hasher,
    ));

    info!("✅ 모든 서비스가 성공적으로 구성되었습니다!");

    // HTTP 서버 시작
    start_http_server(token_service, oauth_client, user_service).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, 로깅, 경로 정규화 미들웨어를 포함하며, 구성된 서비스들을
/// 워커마다 공유되는 `web::Data`로 등록합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(
    token_service: web::Data<TokenService>,
    oauth_client: web::Data<OAuthClient>,
    user_service: web::Data<UserService>,
) -> std::io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    HttpServer::new(move || {
        // CORS 설정
        let cors = configure_cors();

        App::new()
            // 구성된 서비스 주입
            .app_data(token_service.clone())
            .app_data(oauth_client.clone())
            .app_data(user_service.clone())

            // 미들웨어
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())

            // 라우트 설정
            .configure(configure_all_routes)
    })
    .bind(&bind_address)?
    .workers(4) // 워커 스레드 수
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// PROFILE 환경변수에 따라 적절한 .env 파일을 로드합니다.
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            // 기본 .env 파일 로드
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// 환경변수 RUST_LOG를 기반으로 로깅 레벨을 설정합니다.
/// 기본값은 info 레벨이며, actix_web은 debug 레벨로 설정됩니다.
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// MongoDB 연결을 초기화합니다
///
/// # Panics
///
/// * MongoDB 연결 실패 시
async fn initialize_database() -> Arc<Database> {
    info!("📡 데이터베이스 연결 중...");

    let database = Arc::new(Database::new().await.expect("데이터베이스 연결 실패"));

    info!("✅ MongoDB 연결 성공");

    database
}

/// CORS 설정을 구성합니다
///
/// 프론트엔드(React 개발 서버)와의 통신을 위한 CORS 설정입니다.
///
/// # Allowed Origins
///
/// * `http://localhost:3000` - React 개발 서버
/// * `http://localhost:8080` - 자체 서버
/// * `127.0.0.1` 동등한 주소들
fn configure_cors() -> Cors {
    Cors::default()
        // 허용할 Origin 설정
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")

        // 허용할 HTTP 메서드
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])

        // 허용할 헤더
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])

        // 자격 증명(쿠키 등) 지원
        .supports_credentials()

        // Preflight 요청 캐시 시간 (초)
        .max_age(3600)
}
