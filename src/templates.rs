use maud::{DOCTYPE, Markup, PreEscaped, html};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const INPUT_CLASS: &str = "shadow appearance-none border rounded w-full py-2 px-3 \
     text-gray-700 leading-tight focus:outline-none focus:shadow-outline";

/// Which view the page opens on; both are present and toggled client-side.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum View {
    Catalog,
    Admin,
}

pub fn app_page(view: View) -> String {
    page(
        "MovieApp",
        html! {
            div class="min-h-screen bg-gray-100 font-sans" {
                (navbar())
                main class="container mx-auto p-6" {
                    (catalog_view(view == View::Catalog))
                    (admin_view(view == View::Admin))
                }
            }
            (detail_modal())
            script { (PreEscaped(APP_JS)) }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

fn navbar() -> Markup {
    html! {
        nav class="bg-gray-800 p-4 shadow-md" {
            div class="container mx-auto flex justify-between items-center" {
                a class="text-white text-2xl font-bold" href="/" data-view="catalog" { "MovieApp" }
                div class="space-x-4" {
                    a class="text-gray-300 hover:text-white" href="/" data-view="catalog" { "Home" }
                    a class="text-gray-300 hover:text-white" href="/admin" data-view="admin" { "Admin" }
                }
            }
        }
    }
}

fn catalog_view(active: bool) -> Markup {
    html! {
        section id="catalog-view" class=(view_class(active)) {
            div class="mb-6 flex justify-center" {
                input id="search" type="text" placeholder="Search movies..."
                    class="p-3 w-full max-w-md rounded-lg border border-gray-300 focus:outline-none focus:ring-2 focus:ring-blue-500 shadow-sm";
            }
            p id="catalog-loading" class="text-center text-blue-600 text-lg" { "Loading movies..." }
            p id="catalog-error" class="hidden text-center text-red-600 text-lg" {}
            p id="catalog-empty" class="hidden text-center text-gray-600 text-lg" {
                "No movies found. Try adding some from the Admin page!"
            }
            div id="movie-grid" class="grid grid-cols-1 sm:grid-cols-2 md:grid-cols-3 lg:grid-cols-4 gap-6" {}
        }
    }
}

fn admin_view(active: bool) -> Markup {
    html! {
        section id="admin-view" class=(view_class(active)) {
            div class="container mx-auto p-6 bg-white rounded-lg shadow-md mt-8" {
                h2 class="text-3xl font-bold text-gray-900 mb-6 text-center" { "Admin - Add New Movie" }
                div id="admin-message" class="hidden" {}
                form id="movie-form" class="grid grid-cols-1 md:grid-cols-2 gap-6" novalidate {
                    (text_field("title", "Title:", "text"))
                    div {
                        label class="block text-gray-700 text-sm font-bold mb-2" for="posterFile" { "Upload Poster Image:" }
                        input type="file" id="posterFile" name="posterFile" accept="image/*"
                            class=(INPUT_CLASS);
                        div id="preview-wrap" class="mt-4 hidden" {
                            p class="block text-gray-700 text-sm font-bold mb-2" { "Image Preview:" }
                            img id="poster-preview" class="w-32 h-auto rounded-md shadow-md" alt="Poster preview";
                        }
                    }
                    (text_field("trailerUrl", "Trailer Embed URL (YouTube):", "url"))
                    (text_field("genre", "Genre:", "text"))
                    (text_field("releaseYear", "Release Year:", "number"))
                    (text_field("director", "Director:", "text"))
                    (text_field("cast", "Cast (comma separated):", "text"))
                    div class="md:col-span-2" {
                        label class="block text-gray-700 text-sm font-bold mb-2" for="description" { "Description:" }
                        textarea id="description" name="description" rows="4" class=(INPUT_CLASS) {}
                    }
                    div class="md:col-span-2 text-center" {
                        button type="submit"
                            class="bg-blue-500 hover:bg-blue-700 text-white font-bold py-2 px-6 rounded focus:outline-none focus:shadow-outline" {
                            "Add Movie"
                        }
                    }
                }
            }
        }
    }
}

fn text_field(id: &str, label: &str, kind: &str) -> Markup {
    html! {
        div {
            label class="block text-gray-700 text-sm font-bold mb-2" for=(id) { (label) }
            input type=(kind) id=(id) name=(id) class=(INPUT_CLASS);
        }
    }
}

fn detail_modal() -> Markup {
    html! {
        div id="movie-modal" class="hidden fixed inset-0 bg-black bg-opacity-75 flex justify-center items-center z-50 p-4" {
            div class="bg-white rounded-lg shadow-xl max-w-3xl w-full max-h-[90vh] overflow-y-auto relative" {
                button id="modal-close" type="button"
                    class="absolute top-3 right-3 text-gray-600 hover:text-gray-900 text-3xl font-bold" {
                    (PreEscaped("&times;"))
                }
                div class="p-6" {
                    h2 id="modal-title" class="text-3xl font-bold text-gray-900 mb-4" {}
                    div class="flex flex-col md:flex-row gap-6 mb-6" {
                        img id="modal-poster" class="w-full md:w-1/3 h-auto rounded-lg shadow-md object-cover" alt="Poster";
                        div class="flex-1" {
                            p id="modal-description" class="text-gray-700 text-lg mb-4" {}
                            p class="text-gray-800 mb-2" { span class="font-semibold" { "Genre: " } span id="modal-genre" {} }
                            p class="text-gray-800 mb-2" { span class="font-semibold" { "Release Year: " } span id="modal-year" {} }
                            p class="text-gray-800 mb-2" { span class="font-semibold" { "Director: " } span id="modal-director" {} }
                            p class="text-gray-800 mb-2" { span class="font-semibold" { "Cast: " } span id="modal-cast" {} }
                        }
                    }
                    div id="modal-trailer-wrap" class="mt-6 hidden" {
                        h3 class="text-2xl font-semibold text-gray-900 mb-3" { "Trailer" }
                        div class="relative h-0" style="padding-bottom:56.25%" {
                            iframe id="modal-trailer" title="Trailer"
                                class="absolute top-0 left-0 w-full h-full rounded-lg"
                                allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture"
                                allowfullscreen {}
                        }
                    }
                }
            }
        }
    }
}

fn view_class(active: bool) -> &'static str {
    if active { "" } else { "hidden" }
}

// All page behavior: the one-shot list fetch, client-side title filtering,
// the detail overlay, view switching, and the admin form with its poster
// preview lifecycle.
const APP_JS: &str = r##"
'use strict';

const state = { movies: [], search: '', selected: null, loading: true, error: null };

const el = (id) => document.getElementById(id);

function showView(view) {
  el('catalog-view').classList.toggle('hidden', view !== 'catalog');
  el('admin-view').classList.toggle('hidden', view !== 'admin');
}

document.querySelectorAll('[data-view]').forEach((link) => {
  link.addEventListener('click', (ev) => {
    ev.preventDefault();
    history.pushState(null, '', link.getAttribute('href'));
    showView(link.dataset.view);
  });
});

window.addEventListener('popstate', () => {
  showView(location.pathname === '/admin' ? 'admin' : 'catalog');
});

async function fetchMovies() {
  state.loading = true;
  state.error = null;
  renderCatalog();
  try {
    const res = await fetch('/api/movies');
    if (!res.ok) throw new Error('status ' + res.status);
    state.movies = await res.json();
  } catch (err) {
    state.movies = [];
    state.error = 'Failed to load movies. Please check if the backend server is running and accessible.';
  } finally {
    state.loading = false;
    renderCatalog();
  }
}

function filteredMovies() {
  const term = state.search.toLowerCase();
  return state.movies.filter((m) => m.title.toLowerCase().includes(term));
}

function renderCatalog() {
  const movies = filteredMovies();
  el('catalog-loading').classList.toggle('hidden', !state.loading);
  el('catalog-error').classList.toggle('hidden', state.loading || !state.error);
  el('catalog-error').textContent = state.error || '';
  el('catalog-empty').classList.toggle('hidden', state.loading || !!state.error || movies.length > 0);
  const grid = el('movie-grid');
  grid.textContent = '';
  if (state.loading || state.error) return;
  for (const movie of movies) grid.appendChild(movieCard(movie));
}

function movieCard(movie) {
  const card = document.createElement('div');
  card.className = 'bg-white rounded-lg shadow-lg overflow-hidden cursor-pointer transform hover:scale-105 transition duration-300 ease-in-out';
  const img = document.createElement('img');
  img.src = movie.posterUrl;
  img.alt = movie.title;
  img.className = 'w-full h-72 object-cover';
  const body = document.createElement('div');
  body.className = 'p-4';
  const title = document.createElement('h3');
  title.className = 'text-xl font-semibold text-gray-800 truncate';
  title.textContent = movie.title;
  const year = document.createElement('p');
  year.className = 'text-gray-600 text-sm mt-1';
  year.textContent = movie.releaseYear ?? '';
  body.append(title, year);
  card.append(img, body);
  card.addEventListener('click', () => openModal(movie));
  return card;
}

function openModal(movie) {
  state.selected = movie;
  el('modal-title').textContent = movie.title;
  el('modal-poster').src = movie.posterUrl;
  el('modal-poster').alt = movie.title;
  el('modal-description').textContent = movie.description;
  el('modal-genre').textContent = movie.genre;
  el('modal-year').textContent = movie.releaseYear ?? '';
  el('modal-director').textContent = movie.director;
  el('modal-cast').textContent = (movie.cast || []).join(', ');
  const hasTrailer = !!movie.trailerUrl;
  el('modal-trailer-wrap').classList.toggle('hidden', !hasTrailer);
  el('modal-trailer').src = hasTrailer ? movie.trailerUrl : '';
  el('movie-modal').classList.remove('hidden');
}

function closeModal() {
  state.selected = null;
  el('modal-trailer').src = '';
  el('movie-modal').classList.add('hidden');
}

el('modal-close').addEventListener('click', closeModal);
el('movie-modal').addEventListener('click', (ev) => {
  if (ev.target === el('movie-modal')) closeModal();
});

el('search').addEventListener('input', (ev) => {
  state.search = ev.target.value;
  renderCatalog();
});

let posterFile = null;
let previewUrl = '';
let messageTimer = null;

function setMessage(text, ok) {
  const box = el('admin-message');
  clearTimeout(messageTimer);
  box.textContent = text;
  box.className = 'p-3 mb-4 rounded-md text-center ' +
    (ok ? 'bg-green-100 text-green-700' : 'bg-red-100 text-red-700');
  messageTimer = setTimeout(() => box.classList.add('hidden'), 3000);
}

function releasePreview() {
  if (previewUrl) {
    URL.revokeObjectURL(previewUrl);
    previewUrl = '';
  }
  el('preview-wrap').classList.add('hidden');
}

el('posterFile').addEventListener('change', (ev) => {
  releasePreview();
  posterFile = ev.target.files[0] || null;
  if (posterFile) {
    previewUrl = URL.createObjectURL(posterFile);
    el('poster-preview').src = previewUrl;
    el('preview-wrap').classList.remove('hidden');
  }
});

el('movie-form').addEventListener('submit', async (ev) => {
  ev.preventDefault();
  const value = (id) => el(id).value;
  if (!value('title') || !value('description') || !value('trailerUrl') || !posterFile) {
    setMessage('Please fill in all required fields and upload a poster.', false);
    return;
  }
  const form = new FormData();
  for (const id of ['title', 'description', 'trailerUrl', 'genre', 'releaseYear', 'director', 'cast']) {
    form.append(id, value(id));
  }
  form.append('posterImage', posterFile);
  try {
    const res = await fetch('/api/movies', { method: 'POST', body: form });
    const data = await res.json();
    if (res.ok) {
      setMessage('Movie added successfully!', true);
      el('movie-form').reset();
      posterFile = null;
      releasePreview();
      fetchMovies();
    } else {
      setMessage('Error: ' + (data.message || 'Failed to add movie.'), false);
    }
  } catch (err) {
    setMessage('An error occurred while adding the movie.', false);
  }
});

showView(location.pathname === '/admin' ? 'admin' : 'catalog');
fetchMovies();
"##;
