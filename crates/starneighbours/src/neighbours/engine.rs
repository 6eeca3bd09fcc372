//! The neighbour-discovery engine.

use std::collections::{BTreeSet, HashMap};

use futures::stream::{self, StreamExt};

use crate::platform::StarGraphClient;

use super::types::{ComputeOptions, Neighbour, NeighbourError};

/// Compute the neighbours of `owner/repo`.
///
/// Fetches the repository's stargazers, fans out to each stargazer's own
/// starred repositories (bounded by [`ComputeOptions::concurrency`]), and
/// aggregates a reverse index from repository full name to the stargazers
/// who starred it. Every repository other than the queried one whose shared
/// stargazer set is non-empty becomes a [`Neighbour`].
///
/// A failed per-stargazer fetch is logged at warn level and skipped: a
/// single deleted or unreachable account degrades completeness but never
/// fails the whole computation. Only the stargazer fetch of the queried
/// repository itself aborts on error; a repository that does not exist
/// upstream therefore surfaces as a `NotFound`-caused [`NeighbourError`],
/// while a repository with zero stargazers yields `Ok` with an empty list.
/// Callers should keep the two apart.
///
/// The result is sorted by repository full name, so it does not depend on
/// the order stargazers were processed in. Dropping the returned future
/// cancels the computation; no fetch outlives it.
pub async fn find_neighbours<C>(
    client: &C,
    owner: &str,
    repo: &str,
    options: &ComputeOptions,
) -> Result<Vec<Neighbour>, NeighbourError>
where
    C: StarGraphClient + ?Sized,
{
    let full_name = format!("{owner}/{repo}");

    let stargazers =
        client
            .fetch_stargazers(owner, repo)
            .await
            .map_err(|source| NeighbourError::Stargazers {
                repo: full_name.clone(),
                source,
            })?;

    let seed: BTreeSet<String> = stargazers.into_iter().collect();
    if seed.is_empty() {
        return Ok(Vec::new());
    }

    tracing::debug!(repo = %full_name, stargazers = seed.len(), "fanning out");

    // Fan out per stargazer. Results merge in the driving task, so the
    // reverse index needs no lock and no contribution can be lost.
    let concurrency = options.concurrency.max(1);
    let mut fetches = stream::iter(seed.clone())
        .map(|user| async move {
            let starred = client.fetch_starred_repos(&user).await;
            (user, starred)
        })
        .buffer_unordered(concurrency);

    let mut index: HashMap<String, BTreeSet<String>> = HashMap::new();
    while let Some((user, starred)) = fetches.next().await {
        match starred {
            Ok(starred) => {
                for repo_id in starred {
                    index.entry(repo_id).or_default().insert(user.clone());
                }
            }
            Err(err) => {
                // One poisoned stargazer must not sink the whole query.
                tracing::warn!(%user, error = %err, "skipping stargazer, starred fetch failed");
            }
        }
    }

    let mut neighbours: Vec<Neighbour> = index
        .into_iter()
        .filter(|(repo_id, _)| *repo_id != full_name)
        .map(|(repo_id, users)| Neighbour {
            repo: repo_id,
            stargazers: users.intersection(&seed).cloned().collect(),
        })
        .filter(|n| !n.stargazers.is_empty())
        .collect();

    neighbours.sort_by(|a, b| a.repo.cmp(&b.repo));
    Ok(neighbours)
}
