use crate::common::fake_shop::{registration_accepted_response, registration_page_response};
use crate::common::fake_webdriver::{COOKIE_SCOPE_PATH, SHOP_BASE_URL};
use crate::common::{
    AUTH_COOKIE_VALUE, ann_lee, function_name, spawn_fake_shop, spawn_fake_webdriver,
};
use claims::{assert_matches, assert_ok, assert_some};
use demowebshop_e2e::session_bridge::{
    AUTH_COOKIE_NAME, AuthCookie, BridgeError, authenticate_browser, register_and_bridge,
    verify_browser_cookie,
};
use wiremock::Mock;
use wiremock::matchers::{method, path};

#[tokio::test]
async fn the_shop_is_opened_before_the_auth_cookie_is_set() {
    tracing::info!(test = %function_name!(), "Starting");
    // Arrange
    let webdriver = spawn_fake_webdriver().await;
    let browser = webdriver.connect().await;
    let cookie = AuthCookie::new(AUTH_COOKIE_NAME, AUTH_COOKIE_VALUE);

    // Act
    assert_ok!(authenticate_browser(&browser, &cookie).await);

    // Assert
    let (navigated_at, navigation) = assert_some!(webdriver.find_command("POST", "/url").await);
    let (cookie_set_at, _) = assert_some!(webdriver.find_command("POST", "/cookie").await);
    assert!(navigated_at < cookie_set_at);
    assert_eq!(
        navigation["url"],
        format!("{SHOP_BASE_URL}{COOKIE_SCOPE_PATH}")
    );
    assert_ok!(browser.close().await);
}

#[tokio::test]
async fn the_browser_receives_the_auth_cookie_byte_for_byte() {
    tracing::info!(test = %function_name!(), "Starting");
    let webdriver = spawn_fake_webdriver().await;
    let browser = webdriver.connect().await;
    let raw = "2F3A1B9C%2Bxyz==";
    let cookie = AuthCookie::new(AUTH_COOKIE_NAME, raw);

    assert_ok!(authenticate_browser(&browser, &cookie).await);

    let (_, body) = assert_some!(webdriver.find_command("POST", "/cookie").await);
    assert_eq!(body["cookie"]["name"], "NOPCOMMERCE.AUTH");
    assert_eq!(body["cookie"]["value"], raw);
    assert_ok!(browser.close().await);
}

#[tokio::test]
async fn a_browser_holding_the_issued_cookie_passes_verification() {
    tracing::info!(test = %function_name!(), "Starting");
    let webdriver = spawn_fake_webdriver().await;
    webdriver
        .mount_cookie(AUTH_COOKIE_NAME, AUTH_COOKIE_VALUE)
        .await;
    let browser = webdriver.connect().await;
    let cookie = AuthCookie::new(AUTH_COOKIE_NAME, AUTH_COOKIE_VALUE);

    assert_ok!(verify_browser_cookie(&browser, &cookie).await);
    assert_ok!(browser.close().await);
}

#[tokio::test]
async fn a_browser_holding_another_cookie_value_fails_verification() {
    tracing::info!(test = %function_name!(), "Starting");
    let webdriver = spawn_fake_webdriver().await;
    webdriver
        .mount_cookie(AUTH_COOKIE_NAME, "SOMEONE-ELSES-LOGIN")
        .await;
    let browser = webdriver.connect().await;
    let cookie = AuthCookie::new(AUTH_COOKIE_NAME, AUTH_COOKIE_VALUE);

    let outcome = verify_browser_cookie(&browser, &cookie).await;

    // The mismatch comes back as an error, so the session can still be closed
    assert_matches!(outcome, Err(BridgeError::CookieMismatch));
    assert_ok!(browser.close().await);
}

#[tokio::test]
async fn bridging_hands_the_cookie_issued_over_http_to_the_browser() {
    tracing::info!(test = %function_name!(), "Starting");
    // Arrange
    let shop = spawn_fake_shop().await;
    shop.mount_registration_page(registration_page_response()).await;
    Mock::given(path("/register"))
        .and(method("POST"))
        .respond_with(registration_accepted_response(AUTH_COOKIE_VALUE))
        .expect(1)
        .mount(&shop.server)
        .await;
    let webdriver = spawn_fake_webdriver().await;
    let browser = webdriver.connect().await;

    // Act
    let cookie = assert_ok!(register_and_bridge(&shop.api_client, &browser, &ann_lee()).await);

    // Assert
    assert_eq!(cookie.value(), AUTH_COOKIE_VALUE);
    let (_, body) = assert_some!(webdriver.find_command("POST", "/cookie").await);
    assert_eq!(body["cookie"]["name"], AUTH_COOKIE_NAME);
    assert_eq!(body["cookie"]["value"], AUTH_COOKIE_VALUE);
    assert_ok!(browser.close().await);
}
