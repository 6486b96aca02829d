diesel::table! {
    weather_history (id) {
        id -> BigInt,
        temperature -> Nullable<Double>,
        humidity -> Nullable<Double>,
        timestamp -> BigInt,
    }
}
