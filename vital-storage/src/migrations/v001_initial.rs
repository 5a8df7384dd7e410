//! v001: correlations, trigger_patterns, predictions, risk_assessments.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS correlations (
    id                   TEXT NOT NULL,
    user_id              TEXT NOT NULL,
    variable_a           TEXT NOT NULL,
    variable_b           TEXT NOT NULL,
    lag_days             INTEGER NOT NULL,
    analysis_period_days INTEGER NOT NULL,
    coefficient          REAL NOT NULL,
    p_value              REAL NOT NULL,
    sample_size          INTEGER NOT NULL,
    effect_type          TEXT NOT NULL,
    effect_magnitude     TEXT NOT NULL,
    computed_at          TEXT NOT NULL,
    expires_at           TEXT NOT NULL,
    PRIMARY KEY (user_id, variable_a, variable_b, lag_days, analysis_period_days)
);

CREATE INDEX IF NOT EXISTS idx_correlations_user
    ON correlations(user_id, analysis_period_days);
CREATE INDEX IF NOT EXISTS idx_correlations_expiry
    ON correlations(expires_at);

CREATE TABLE IF NOT EXISTS trigger_patterns (
    id                TEXT PRIMARY KEY,
    user_id           TEXT NOT NULL,
    symptom_type      TEXT NOT NULL,
    pattern_type      TEXT NOT NULL,
    trigger_variables TEXT NOT NULL,
    pattern_strength  REAL NOT NULL,
    confidence        REAL NOT NULL,
    trigger_threshold REAL NOT NULL,
    times_observed    INTEGER NOT NULL,
    times_validated   INTEGER NOT NULL,
    last_observed_at  TEXT NOT NULL,
    is_active         INTEGER NOT NULL,
    user_acknowledged INTEGER NOT NULL,
    missed_cycles     INTEGER NOT NULL,
    created_at        TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_patterns_user ON trigger_patterns(user_id);

CREATE TABLE IF NOT EXISTS predictions (
    id               TEXT PRIMARY KEY,
    user_id          TEXT NOT NULL,
    prediction_type  TEXT NOT NULL,
    metric           TEXT NOT NULL,
    prediction_date  TEXT NOT NULL,
    horizon_days     INTEGER NOT NULL,
    predicted_value  REAL NOT NULL,
    confidence       REAL NOT NULL,
    range_lower      REAL NOT NULL,
    range_upper      REAL NOT NULL,
    actual_value     REAL,
    prediction_error REAL,
    status           TEXT NOT NULL,
    created_at       TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_predictions_due
    ON predictions(user_id, status, prediction_date);

CREATE TABLE IF NOT EXISTS risk_assessments (
    id                   TEXT PRIMARY KEY,
    user_id              TEXT NOT NULL,
    category             TEXT NOT NULL,
    risk_type            TEXT NOT NULL,
    risk_score           REAL NOT NULL,
    risk_level           TEXT NOT NULL,
    window_start         TEXT NOT NULL,
    window_end           TEXT NOT NULL,
    contributing_factors TEXT NOT NULL,
    is_active            INTEGER NOT NULL,
    assessed_at          TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_risks_active
    ON risk_assessments(user_id, is_active);
";
