//! Postgres 排行榜聚合实现

use crate::error::StorageError;
use crate::models::LogRecord;
use crate::traits::RankingStore;
use domain::{IpCallRanking, UserAggregate, UserMinuteIpRanking};
use sqlx::{PgPool, Row};

pub struct PgRankingStore {
    pub pool: PgPool,
}

impl PgRankingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl RankingStore for PgRankingStore {
    async fn record_log(&self, record: LogRecord) -> Result<(), StorageError> {
        sqlx::query(
            "insert into logs \
             (user_id, username, display_name, ip, tokens, quota, created_at) \
             values ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(record.user_id)
        .bind(&record.username)
        .bind(&record.display_name)
        .bind(&record.ip)
        .bind(record.tokens)
        .bind(record.quota)
        .bind(record.created_at_ms)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn user_aggregates(&self, since_ms: i64) -> Result<Vec<UserAggregate>, StorageError> {
        let rows = sqlx::query(
            "select username, \
             coalesce(max(nullif(display_name, '')), '') as display_name, \
             coalesce(string_agg(distinct nullif(trim(ip), ''), ','), '') as ip, \
             count(distinct nullif(trim(ip), ''))::bigint as ip_count, \
             count(*)::bigint as count, \
             coalesce(sum(tokens), 0)::bigint as tokens, \
             coalesce(sum(quota), 0)::bigint as quota \
             from logs \
             where created_at >= $1 \
             group by username",
        )
        .bind(since_ms)
        .fetch_all(&self.pool)
        .await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(UserAggregate {
                username: row.try_get("username")?,
                display_name: row.try_get("display_name")?,
                ip: row.try_get("ip")?,
                ip_count: row.try_get("ip_count")?,
                count: row.try_get("count")?,
                tokens: row.try_get("tokens")?,
                quota: row.try_get("quota")?,
            });
        }
        Ok(items)
    }

    async fn ip_call_ranking(
        &self,
        since_ms: i64,
        limit: i64,
    ) -> Result<Vec<IpCallRanking>, StorageError> {
        let rows = sqlx::query(
            "select trim(ip) as ip, \
             string_agg(distinct username, ',') as username, \
             coalesce(string_agg(distinct nullif(display_name, ''), ','), '') as display_name, \
             count(*)::bigint as count \
             from logs \
             where created_at >= $1 and trim(ip) <> '' \
             group by trim(ip) \
             order by count desc \
             limit $2",
        )
        .bind(since_ms)
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(IpCallRanking {
                ip: row.try_get("ip")?,
                username: row.try_get("username")?,
                display_name: row.try_get("display_name")?,
                count: row.try_get("count")?,
            });
        }
        Ok(items)
    }

    async fn user_minute_ip_ranking(
        &self,
        since_ms: i64,
        limit: i64,
    ) -> Result<Vec<UserMinuteIpRanking>, StorageError> {
        let rows = sqlx::query(
            "select username, display_name, ip, ip_count, minute from ( \
               select username, \
               coalesce(max(nullif(display_name, '')), '') as display_name, \
               string_agg(distinct trim(ip), ',') as ip, \
               count(distinct trim(ip))::bigint as ip_count, \
               to_char(to_timestamp(created_at / 1000) at time zone 'UTC', 'YYYY-MM-DD HH24:MI') as minute, \
               row_number() over ( \
                 partition by username order by count(distinct trim(ip)) desc \
               ) as rn \
               from logs \
               where created_at >= $1 and trim(ip) <> '' \
               group by username, minute \
             ) peaks \
             where rn = 1 \
             order by ip_count desc \
             limit $2",
        )
        .bind(since_ms)
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(UserMinuteIpRanking {
                username: row.try_get("username")?,
                display_name: row.try_get("display_name")?,
                ip: row.try_get("ip")?,
                ip_count: row.try_get("ip_count")?,
                minute: row.try_get("minute")?,
            });
        }
        Ok(items)
    }
}
