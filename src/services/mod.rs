/*
 * Responsibility
 * - handler / middleware から共有されるプロセス全体のサービス
 */
pub mod auth;
