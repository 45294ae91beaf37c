pub async fn welcome() -> &'static str {
    "Welcome to the myFlix API!"
}
